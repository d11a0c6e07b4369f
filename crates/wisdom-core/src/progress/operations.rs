//! Domain operations on UserState.
//!
//! Each operation reads the current state and returns the partial update
//! that expresses it. Nothing here touches storage; the progress store
//! applies the result through its single `update` path.

use std::collections::BTreeSet;

use super::model::{NotificationTime, UserState};
use super::update::UserStateUpdate;
use crate::day::Day;
use crate::error::{Result, WisdomError};

fn toggled(set: &BTreeSet<Day>, day: Day) -> BTreeSet<Day> {
    let mut next = set.clone();
    if !next.remove(&day) {
        next.insert(day);
    }
    next
}

/// Marks `day` complete, or un-marks it if it already was.
pub fn toggle_completed(state: &UserState, day: Day) -> UserStateUpdate {
    UserStateUpdate::new().completed_days(toggled(&state.completed_days, day))
}

/// Adds `day` to favorites, or removes it if it already was one.
pub fn toggle_favorite(state: &UserState, day: Day) -> UserStateUpdate {
    UserStateUpdate::new().favorites(toggled(&state.favorites, day))
}

/// Replaces the journal text for `day`, keeping every other entry.
///
/// Blank text removes the entry.
pub fn write_journal(state: &UserState, day: Day, text: &str) -> UserStateUpdate {
    let mut entries = state.journal_entries.clone();
    if text.trim().is_empty() {
        entries.remove(&day);
    } else {
        entries.insert(day, text.to_string());
    }
    UserStateUpdate::new().journal_entries(entries)
}

pub fn toggle_theme(state: &UserState) -> UserStateUpdate {
    UserStateUpdate::new().theme(state.theme.toggled())
}

/// Moves to the next day. Empty update on day 31.
pub fn advance(state: &UserState) -> UserStateUpdate {
    match state.current_day.next() {
        Some(day) => UserStateUpdate::new().current_day(day),
        None => UserStateUpdate::new(),
    }
}

/// Moves to the previous day. Empty update on day 1.
pub fn retreat(state: &UserState) -> UserStateUpdate {
    match state.current_day.previous() {
        Some(day) => UserStateUpdate::new().current_day(day),
        None => UserStateUpdate::new(),
    }
}

pub fn select_day(day: Day) -> UserStateUpdate {
    UserStateUpdate::new().current_day(day)
}

/// Turns reminders on or off, optionally moving the reminder time.
pub fn set_notifications(enabled: bool, time: Option<NotificationTime>) -> UserStateUpdate {
    let update = UserStateUpdate::new().notifications_enabled(enabled);
    match time {
        Some(time) => update.notification_time(time),
        None => update,
    }
}

/// Records the reader's name and finishes onboarding.
pub fn complete_onboarding(name: &str) -> Result<UserStateUpdate> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WisdomError::invalid_input("name must not be blank"));
    }
    Ok(UserStateUpdate::new().name(name).is_onboarded(true))
}

/// Stores a user-supplied credential; blank input clears it.
pub fn set_custom_credential(credential: Option<&str>) -> UserStateUpdate {
    let credential = credential
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    UserStateUpdate::new().custom_credential(credential)
}

/// Whether to suggest moving on after `day` was just marked complete.
pub fn suggests_next_day(state: &UserState, day: Day) -> bool {
    state.is_completed(day) && day.next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Theme;

    fn day(n: i64) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn test_toggle_completed_is_involution() {
        let mut state = UserState::default();
        state.completed_days.insert(day(2));
        let original = state.clone();

        let once = state.clone().merge(toggle_completed(&state, day(7)));
        assert!(once.is_completed(day(7)));
        let twice = once.clone().merge(toggle_completed(&once, day(7)));
        assert_eq!(twice.completed_days, original.completed_days);
    }

    #[test]
    fn test_toggle_favorite_is_involution() {
        let state = UserState::default();
        let once = state.clone().merge(toggle_favorite(&state, day(31)));
        assert!(once.is_favorite(day(31)));
        let twice = once.clone().merge(toggle_favorite(&once, day(31)));
        assert_eq!(twice.favorites, state.favorites);
    }

    #[test]
    fn test_write_journal_preserves_other_days() {
        let mut state = UserState::default();
        state.journal_entries.insert(day(1), "um".into());
        state.journal_entries.insert(day(9), "nove".into());

        let merged = state.clone().merge(write_journal(&state, day(5), "text"));

        assert_eq!(merged.journal_entry(day(5)), Some("text"));
        assert_eq!(merged.journal_entry(day(1)), Some("um"));
        assert_eq!(merged.journal_entry(day(9)), Some("nove"));
        assert_eq!(merged.journal_entries.len(), 3);
    }

    #[test]
    fn test_blank_journal_removes_entry() {
        let mut state = UserState::default();
        state.journal_entries.insert(day(5), "texto".into());
        let merged = state.clone().merge(write_journal(&state, day(5), "   "));
        assert_eq!(merged.journal_entry(day(5)), None);
    }

    #[test]
    fn test_advance_and_retreat_stop_at_bounds() {
        let mut state = UserState::default();
        assert!(retreat(&state).is_empty());

        state.current_day = Day::LAST;
        assert!(advance(&state).is_empty());
        assert_eq!(state.clone().merge(advance(&state)).current_day, Day::LAST);

        let back = state.clone().merge(retreat(&state));
        assert_eq!(back.current_day, day(30));
    }

    #[test]
    fn test_toggle_theme() {
        let state = UserState::default();
        assert_eq!(toggle_theme(&state).theme, Some(Theme::Dark));
    }

    #[test]
    fn test_onboarding_requires_name() {
        assert!(complete_onboarding("   ").is_err());
        let update = complete_onboarding("  Maria ").unwrap();
        assert_eq!(update.name.as_deref(), Some("Maria"));
        assert_eq!(update.is_onboarded, Some(true));
    }

    #[test]
    fn test_set_notifications_keeps_time_when_absent() {
        let update = set_notifications(false, None);
        assert_eq!(update.notifications_enabled, Some(false));
        assert_eq!(update.notification_time, None);

        let time = NotificationTime::new(21, 30).unwrap();
        assert_eq!(set_notifications(true, Some(time)).notification_time, Some(time));
    }

    #[test]
    fn test_blank_credential_clears() {
        assert_eq!(set_custom_credential(Some("  ")).custom_credential, Some(None));
        assert_eq!(
            set_custom_credential(Some(" abc ")).custom_credential,
            Some(Some("abc".to_string()))
        );
    }

    #[test]
    fn test_next_day_suggestion() {
        let mut state = UserState::default();
        state.completed_days.insert(day(3));
        state.completed_days.insert(Day::LAST);
        assert!(suggests_next_day(&state, day(3)));
        assert!(!suggests_next_day(&state, Day::LAST));
        assert!(!suggests_next_day(&state, day(4)));
    }
}
