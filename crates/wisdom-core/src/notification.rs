//! Notification platform trait and reminder settings.

use async_trait::async_trait;

use crate::day::Day;
use crate::error::Result;
use crate::progress::{NotificationTime, UserState};

/// Title shown on every daily reminder.
pub const REMINDER_TITLE: &str = "Jornada de Sabedoria";

/// Permission state reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Where reminders are displayed.
///
/// The scheduler only calls [`NotificationPlatform::emit`] after
/// [`NotificationPlatform::permission_status`] reported `Granted`.
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// Asks the user for permission. Resolves to `Granted` or `Denied`.
    async fn request_permission(&self) -> PermissionStatus;

    fn permission_status(&self) -> PermissionStatus;

    fn emit(&self, title: &str, body: &str) -> Result<()>;
}

/// The slice of [`UserState`] the reminder scheduler watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub time: NotificationTime,
    pub current_day: Day,
    pub name: String,
}

impl ReminderSettings {
    /// Body text of the reminder.
    pub fn message(&self) -> String {
        format!(
            "O pergaminho do dia {} está pronto para você, {}.",
            self.current_day, self.name
        )
    }
}

impl From<&UserState> for ReminderSettings {
    fn from(state: &UserState) -> Self {
        Self {
            enabled: state.notifications_enabled,
            time: state.notification_time,
            current_day: state.current_day,
            name: state.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_state() {
        let mut state = UserState::default();
        state.name = "João".into();
        state.current_day = Day::new(12).unwrap();
        state.notifications_enabled = true;

        let settings = ReminderSettings::from(&state);
        assert!(settings.enabled);
        assert_eq!(settings.time.to_string(), "08:00");
        assert_eq!(
            settings.message(),
            "O pergaminho do dia 12 está pronto para você, João."
        );
    }

    #[test]
    fn test_unrelated_fields_do_not_change_settings() {
        let state = UserState::default();
        let mut other = state.clone();
        other.favorites.insert(Day::new(3).unwrap());
        assert_eq!(ReminderSettings::from(&state), ReminderSettings::from(&other));
    }
}
