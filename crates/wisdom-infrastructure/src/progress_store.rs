//! Persistent user progress.
//!
//! The whole [`UserState`] lives under a single key. It is hydrated at
//! construction; changes made in this process go through
//! [`ProgressStore::update`], which merges, persists and notifies subscribers.
//! Writes from other processes are picked up by [`ProgressStore::reload`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};
use wisdom_core::Day;
use wisdom_core::error::Result;
use wisdom_core::progress::operations;
use wisdom_core::progress::{NotificationTime, UserState, UserStateUpdate};
use wisdom_core::storage::KeyValueStore;

/// Store key of the serialized user state.
pub const USER_STATE_KEY: &str = "wisdom_user_v1";

/// Owner of the in-memory [`UserState`] and its persisted copy.
///
/// Writes are serialized by an internal lock, so concurrent updates apply
/// in order and the last one wins. A failed write is logged and the
/// in-memory state still advances; durability is best effort.
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<UserState>,
    changes: watch::Sender<UserState>,
}

impl ProgressStore {
    /// Loads the persisted state, falling back to defaults when it is
    /// missing or unreadable.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let state = hydrate(store.as_ref());
        let (changes, _) = watch::channel(state.clone());
        Self {
            store,
            state: Mutex::new(state),
            changes,
        }
    }

    /// Current state snapshot.
    pub fn load(&self) -> UserState {
        self.lock().clone()
    }

    /// Applies a partial update and returns the resulting state.
    pub fn update(&self, update: UserStateUpdate) -> UserState {
        self.apply(|_| update)
    }

    /// Computes an update from the current state and applies it under the
    /// same lock, so read-modify-write operations never interleave.
    pub fn apply<F>(&self, f: F) -> UserState
    where
        F: FnOnce(&UserState) -> UserStateUpdate,
    {
        let mut state = self.lock();
        let update = f(&*state);
        if update.is_empty() {
            return state.clone();
        }

        let next = state.clone().merge(update);
        if let Err(e) = self.persist(&next) {
            warn!(error = %e, "failed to persist user state, keeping it in memory");
        }
        *state = next.clone();
        drop(state);

        self.changes.send_replace(next.clone());
        next
    }

    /// Deletes the persisted state and returns to defaults.
    ///
    /// Memory is reset even when the delete fails.
    pub fn reset(&self) -> UserState {
        let mut state = self.lock();
        if let Err(e) = self.store.remove(USER_STATE_KEY) {
            warn!(error = %e, "failed to delete stored user state, resetting in memory only");
        }
        *state = UserState::default();
        let fresh = state.clone();
        drop(state);

        info!("user state reset to defaults");
        self.changes.send_replace(fresh.clone());
        fresh
    }

    /// Re-reads the persisted state and adopts it if it differs from memory.
    ///
    /// A missing blob means another process reset the state. Read or parse
    /// failures keep the in-memory state. Returns whether anything changed.
    pub fn reload(&self) -> bool {
        let stored = match read_stored(self.store.as_ref()) {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to re-read user state, keeping memory");
                return false;
            }
        };

        let mut state = self.lock();
        if *state == stored {
            return false;
        }
        *state = stored.clone();
        drop(state);

        debug!("user state changed in storage");
        self.changes.send_replace(stored);
        true
    }

    /// Receiver that observes every state change after this call.
    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.changes.subscribe()
    }

    pub fn toggle_completed(&self, day: Day) -> UserState {
        self.apply(|s| operations::toggle_completed(s, day))
    }

    pub fn toggle_favorite(&self, day: Day) -> UserState {
        self.apply(|s| operations::toggle_favorite(s, day))
    }

    pub fn write_journal(&self, day: Day, text: &str) -> UserState {
        self.apply(|s| operations::write_journal(s, day, text))
    }

    pub fn toggle_theme(&self) -> UserState {
        self.apply(operations::toggle_theme)
    }

    pub fn advance(&self) -> UserState {
        self.apply(operations::advance)
    }

    pub fn retreat(&self) -> UserState {
        self.apply(operations::retreat)
    }

    pub fn select_day(&self, day: Day) -> UserState {
        self.update(operations::select_day(day))
    }

    pub fn set_notifications(&self, enabled: bool, time: Option<NotificationTime>) -> UserState {
        self.update(operations::set_notifications(enabled, time))
    }

    pub fn complete_onboarding(&self, name: &str) -> Result<UserState> {
        Ok(self.update(operations::complete_onboarding(name)?))
    }

    pub fn set_custom_credential(&self, credential: Option<&str>) -> UserState {
        self.update(operations::set_custom_credential(credential))
    }

    fn persist(&self, state: &UserState) -> Result<()> {
        let blob = serde_json::to_string(state)?;
        self.store.set(USER_STATE_KEY, &blob)
    }

    fn lock(&self) -> MutexGuard<'_, UserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn hydrate(store: &dyn KeyValueStore) -> UserState {
    match read_stored(store) {
        Ok(Some(state)) => state,
        Ok(None) => {
            debug!("no stored user state, starting fresh");
            UserState::default()
        }
        Err(e) => {
            warn!(error = %e, "stored user state is unreadable, starting fresh");
            UserState::default()
        }
    }
}

fn read_stored(store: &dyn KeyValueStore) -> Result<Option<UserState>> {
    store
        .get(USER_STATE_KEY)?
        .map(|blob| serde_json::from_str(&blob))
        .transpose()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use wisdom_core::progress::Theme;

    fn day(n: i64) -> Day {
        Day::new(n).unwrap()
    }

    fn setup() -> (Arc<MemoryKeyValueStore>, ProgressStore) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let progress = ProgressStore::new(store.clone());
        (store, progress)
    }

    #[test]
    fn test_fresh_install_defaults() {
        let (_, progress) = setup();
        let state = progress.load();
        assert_eq!(state, UserState::default());
        assert_eq!(state.current_day, Day::FIRST);
        assert!(!state.is_onboarded);
    }

    #[test]
    fn test_update_persists_across_instances() {
        let (store, progress) = setup();
        progress.complete_onboarding("Ana").unwrap();
        progress.toggle_completed(day(3));

        let reloaded = ProgressStore::new(store).load();
        assert_eq!(reloaded.name, "Ana");
        assert!(reloaded.is_onboarded);
        assert!(reloaded.is_completed(day(3)));
    }

    #[test]
    fn test_blank_onboarding_name_is_rejected() {
        let (_, progress) = setup();
        assert!(progress.complete_onboarding("  ").is_err());
        assert!(!progress.load().is_onboarded);
    }

    #[test]
    fn test_unparsable_blob_yields_defaults() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store
            .set(USER_STATE_KEY, r#"{"notificationTime":"25:99"}"#)
            .unwrap();
        let progress = ProgressStore::new(store);
        assert_eq!(progress.load(), UserState::default());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let (store, progress) = setup();
        store.fail_writes(true);

        let state = progress.toggle_theme();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(progress.load().theme, Theme::Dark);
        assert!(store.get(USER_STATE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reset_returns_defaults() {
        let (store, progress) = setup();
        progress.complete_onboarding("Ana").unwrap();
        progress.select_day(day(12));

        let fresh = progress.reset();
        assert_eq!(fresh, UserState::default());
        assert_eq!(progress.load(), UserState::default());
        assert!(store.get(USER_STATE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reset_survives_failed_delete() {
        let (store, progress) = setup();
        progress.complete_onboarding("Ana").unwrap();
        let rx = progress.subscribe();
        store.fail_writes(true);

        let fresh = progress.reset();
        assert_eq!(fresh, UserState::default());
        assert_eq!(progress.load(), UserState::default());
        assert!(rx.has_changed().unwrap());
        assert!(store.get(USER_STATE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_reload_picks_up_other_writer() {
        let (store, progress) = setup();
        let mut rx = progress.subscribe();
        assert!(!progress.reload());

        let other = ProgressStore::new(store.clone());
        other.set_notifications(true, Some(NotificationTime::new(21, 15).unwrap()));
        assert!(!rx.has_changed().unwrap());

        assert!(progress.reload());
        assert!(progress.load().notifications_enabled);
        assert_eq!(rx.borrow_and_update().notification_time.to_string(), "21:15");
        assert!(!progress.reload());

        other.reset();
        assert!(progress.reload());
        assert_eq!(progress.load(), UserState::default());
    }

    #[test]
    fn test_reload_keeps_memory_on_garbage() {
        let (store, progress) = setup();
        progress.toggle_theme();
        store.set(USER_STATE_KEY, "{oops").unwrap();

        assert!(!progress.reload());
        assert_eq!(progress.load().theme, Theme::Dark);
    }

    #[test]
    fn test_advance_stops_at_last_day() {
        let (_, progress) = setup();
        progress.select_day(Day::LAST);
        assert_eq!(progress.advance().current_day, Day::LAST);
        assert_eq!(progress.retreat().current_day, day(30));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let (_, progress) = setup();
        let mut rx = progress.subscribe();
        assert!(!rx.has_changed().unwrap());

        progress.set_notifications(true, Some(NotificationTime::new(7, 30).unwrap()));
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert!(seen.notifications_enabled);
        assert_eq!(seen.notification_time.to_string(), "07:30");
    }

    #[test]
    fn test_empty_update_does_not_notify() {
        let (_, progress) = setup();
        let rx = progress.subscribe();
        progress.retreat();
        assert!(!rx.has_changed().unwrap());
    }
}
