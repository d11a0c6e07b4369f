//! Partial updates to UserState.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{NotificationTime, Theme, UserState};
use crate::day::Day;

/// A set of fields to overwrite on [`UserState`].
///
/// Merging is shallow: a `Some` field replaces the whole current value,
/// including collections. Callers that want to change one journal entry
/// compute the full new map from the current state first (see
/// [`super::operations`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStateUpdate {
    pub name: Option<String>,
    pub current_day: Option<Day>,
    pub completed_days: Option<BTreeSet<Day>>,
    pub journal_entries: Option<BTreeMap<Day, String>>,
    pub favorites: Option<BTreeSet<Day>>,
    pub theme: Option<Theme>,
    pub is_onboarded: Option<bool>,
    pub notifications_enabled: Option<bool>,
    pub notification_time: Option<NotificationTime>,
    /// `Some(None)` clears the credential.
    pub custom_credential: Option<Option<String>>,
}

impl UserStateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when merging would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn current_day(mut self, day: Day) -> Self {
        self.current_day = Some(day);
        self
    }

    pub fn completed_days(mut self, days: BTreeSet<Day>) -> Self {
        self.completed_days = Some(days);
        self
    }

    pub fn journal_entries(mut self, entries: BTreeMap<Day, String>) -> Self {
        self.journal_entries = Some(entries);
        self
    }

    pub fn favorites(mut self, days: BTreeSet<Day>) -> Self {
        self.favorites = Some(days);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn is_onboarded(mut self, onboarded: bool) -> Self {
        self.is_onboarded = Some(onboarded);
        self
    }

    pub fn notifications_enabled(mut self, enabled: bool) -> Self {
        self.notifications_enabled = Some(enabled);
        self
    }

    pub fn notification_time(mut self, time: NotificationTime) -> Self {
        self.notification_time = Some(time);
        self
    }

    pub fn custom_credential(mut self, credential: Option<String>) -> Self {
        self.custom_credential = Some(credential);
        self
    }
}

impl UserState {
    /// Applies `update` over `self`, field by field.
    pub fn merge(mut self, update: UserStateUpdate) -> UserState {
        let UserStateUpdate {
            name,
            current_day,
            completed_days,
            journal_entries,
            favorites,
            theme,
            is_onboarded,
            notifications_enabled,
            notification_time,
            custom_credential,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(day) = current_day {
            self.current_day = day;
        }
        if let Some(days) = completed_days {
            self.completed_days = days;
        }
        if let Some(entries) = journal_entries {
            self.journal_entries = entries;
        }
        if let Some(days) = favorites {
            self.favorites = days;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(onboarded) = is_onboarded {
            self.is_onboarded = onboarded;
        }
        if let Some(enabled) = notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(time) = notification_time {
            self.notification_time = time;
        }
        if let Some(credential) = custom_credential {
            self.custom_credential = credential;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn test_empty_update_is_identity() {
        let mut state = UserState::default();
        state.name = "Ana".into();
        state.favorites.insert(day(4));
        assert!(UserStateUpdate::new().is_empty());
        assert_eq!(state.clone().merge(UserStateUpdate::new()), state);
    }

    #[test]
    fn test_merge_only_touches_given_fields() {
        let mut state = UserState::default();
        state.name = "Ana".into();
        state.completed_days.insert(day(1));

        let merged = state
            .clone()
            .merge(UserStateUpdate::new().theme(Theme::Dark).current_day(day(2)));

        assert_eq!(merged.theme, Theme::Dark);
        assert_eq!(merged.current_day, day(2));
        assert_eq!(merged.name, "Ana");
        assert_eq!(merged.completed_days, state.completed_days);
    }

    #[test]
    fn test_collections_replace_wholesale() {
        let mut state = UserState::default();
        state.journal_entries.insert(day(1), "um".into());
        state.journal_entries.insert(day(2), "dois".into());

        let mut replacement = BTreeMap::new();
        replacement.insert(day(5), "cinco".into());
        let merged = state.merge(UserStateUpdate::new().journal_entries(replacement.clone()));

        assert_eq!(merged.journal_entries, replacement);
    }

    #[test]
    fn test_credential_can_be_cleared() {
        let mut state = UserState::default();
        state.custom_credential = Some("k".into());
        let merged = state.merge(UserStateUpdate::new().custom_credential(None));
        assert_eq!(merged.custom_credential, None);
    }
}
