//! Daily reminder scheduler.
//!
//! Wakes on a fixed interval while reminders are enabled and emits one
//! reminder per calendar day when the wall clock reaches the configured
//! time. The interval only exists while reminders are on; it is rebuilt
//! whenever the watched settings change.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wisdom_core::clock::Clock;
use wisdom_core::notification::{
    NotificationPlatform, PermissionStatus, REMINDER_TITLE, ReminderSettings,
};
use wisdom_core::progress::{NotificationTime, UserState};
use wisdom_infrastructure::ProgressStore;

/// Default period between checks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// What a single check decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Disabled,
    NotDue,
    AlreadyNotified,
    PermissionNotGranted,
    Emitted,
    EmitFailed,
}

pub struct NotificationScheduler {
    platform: Arc<dyn NotificationPlatform>,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    /// Date of the last emitted reminder. Lives as long as the scheduler.
    last_notified: Mutex<Option<NaiveDate>>,
}

impl NotificationScheduler {
    pub fn new(platform: Arc<dyn NotificationPlatform>, clock: Arc<dyn Clock>) -> Self {
        Self {
            platform,
            clock,
            tick_interval: DEFAULT_TICK_INTERVAL,
            last_notified: Mutex::new(None),
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Runs one check against `settings`.
    pub fn tick(&self, settings: &ReminderSettings) -> TickOutcome {
        if !settings.enabled {
            return TickOutcome::Disabled;
        }

        let now = self.clock.now();
        if !settings.time.matches(now.time()) {
            return TickOutcome::NotDue;
        }

        let today = now.date();
        let mut last = self.last_notified.lock().unwrap_or_else(PoisonError::into_inner);
        if *last == Some(today) {
            return TickOutcome::AlreadyNotified;
        }

        if self.platform.permission_status() != PermissionStatus::Granted {
            return TickOutcome::PermissionNotGranted;
        }

        match self.platform.emit(REMINDER_TITLE, &settings.message()) {
            Ok(()) => {
                *last = Some(today);
                info!(day = %settings.current_day, %today, "reminder emitted");
                TickOutcome::Emitted
            }
            Err(e) => {
                warn!(error = %e, "failed to emit reminder");
                TickOutcome::EmitFailed
            }
        }
    }

    /// Drives the scheduler until `shutdown` fires or the state sender is
    /// dropped.
    pub async fn run(&self, mut state: watch::Receiver<UserState>, shutdown: CancellationToken) {
        let mut settings = ReminderSettings::from(&*state.borrow_and_update());
        let mut ticker = self.ticker_for(&settings);
        info!(
            enabled = settings.enabled,
            time = %settings.time,
            "reminder scheduler started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = state.changed() => {
                    if changed.is_err() {
                        debug!("state channel closed");
                        break;
                    }
                    let next = ReminderSettings::from(&*state.borrow_and_update());
                    if next != settings {
                        debug!(enabled = next.enabled, time = %next.time, "reminder settings changed");
                        settings = next;
                        ticker = self.ticker_for(&settings);
                    }
                }
                _ = next_tick(&mut ticker) => {
                    let outcome = self.tick(&settings);
                    debug!(?outcome, "reminder check");
                }
            }
        }

        info!("reminder scheduler stopped");
    }

    /// Re-reads `progress` from storage every tick interval until `shutdown`
    /// fires, so writes from other processes reach [`Self::run`].
    pub async fn follow_persisted(&self, progress: &ProgressStore, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if progress.reload() {
                        debug!("picked up stored settings from another process");
                    }
                }
            }
        }
    }

    /// Asks the platform for permission and stores the result.
    ///
    /// Granted turns reminders on (moving the time if one is given);
    /// denied turns them off.
    pub async fn enable_reminders(
        &self,
        progress: &ProgressStore,
        time: Option<NotificationTime>,
    ) -> PermissionStatus {
        let status = match self.platform.permission_status() {
            PermissionStatus::Granted => PermissionStatus::Granted,
            _ => self.platform.request_permission().await,
        };

        match status {
            PermissionStatus::Granted => {
                progress.set_notifications(true, time);
            }
            _ => {
                info!(?status, "reminder permission not granted");
                progress.set_notifications(false, None);
            }
        }
        status
    }

    fn ticker_for(&self, settings: &ReminderSettings) -> Option<Interval> {
        if !settings.enabled {
            return None;
        }
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Some(ticker)
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wisdom_core::Day;
    use wisdom_core::error::{Result, WisdomError};

    struct FixedClock(Mutex<NaiveDateTime>);

    impl FixedClock {
        fn at(text: &str) -> Arc<Self> {
            Arc::new(Self(Mutex::new(
                NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap(),
            )))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    struct FakePlatform {
        status: PermissionStatus,
        fail: bool,
        emitted: Mutex<Vec<(String, String)>>,
        requests: AtomicUsize,
    }

    impl FakePlatform {
        fn new(status: PermissionStatus) -> Arc<Self> {
            Arc::new(Self {
                status,
                fail: false,
                emitted: Mutex::new(Vec::new()),
                requests: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NotificationPlatform for FakePlatform {
        async fn request_permission(&self) -> PermissionStatus {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.status
        }

        fn permission_status(&self) -> PermissionStatus {
            self.status
        }

        fn emit(&self, title: &str, body: &str) -> Result<()> {
            if self.fail {
                return Err(WisdomError::internal("display unavailable"));
            }
            self.emitted
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn settings(enabled: bool) -> ReminderSettings {
        ReminderSettings {
            enabled,
            time: NotificationTime::default(),
            current_day: Day::new(4).unwrap(),
            name: "Maria".into(),
        }
    }

    #[test]
    fn test_two_ticks_same_minute_emit_once() {
        let platform = FakePlatform::new(PermissionStatus::Granted);
        let scheduler =
            NotificationScheduler::new(platform.clone(), FixedClock::at("2026-03-01 08:00:10"));

        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::Emitted);
        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::AlreadyNotified);

        let emitted = platform.emitted.lock().unwrap();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].0, "Jornada de Sabedoria");
        assert!(emitted[0].1.contains("dia 4"));
        assert!(emitted[0].1.contains("Maria"));
    }

    #[test]
    fn test_next_day_emits_again() {
        let platform = FakePlatform::new(PermissionStatus::Granted);
        let clock = FixedClock::at("2026-03-01 08:00:00");
        let scheduler = NotificationScheduler::new(platform.clone(), clock.clone());

        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::Emitted);
        *clock.0.lock().unwrap() =
            NaiveDateTime::parse_from_str("2026-03-02 08:00:30", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::Emitted);
        assert_eq!(platform.emitted.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_skips_when_disabled_or_not_due() {
        let platform = FakePlatform::new(PermissionStatus::Granted);
        let scheduler =
            NotificationScheduler::new(platform.clone(), FixedClock::at("2026-03-01 08:01:00"));

        assert_eq!(scheduler.tick(&settings(false)), TickOutcome::Disabled);
        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::NotDue);
        assert!(platform.emitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_requires_permission() {
        let platform = FakePlatform::new(PermissionStatus::Denied);
        let scheduler =
            NotificationScheduler::new(platform.clone(), FixedClock::at("2026-03-01 08:00:00"));

        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::PermissionNotGranted);
        assert!(platform.emitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_emit_is_retried_next_tick() {
        let platform = Arc::new(FakePlatform {
            status: PermissionStatus::Granted,
            fail: true,
            emitted: Mutex::new(Vec::new()),
            requests: AtomicUsize::new(0),
        });
        let scheduler =
            NotificationScheduler::new(platform, FixedClock::at("2026-03-01 08:00:00"));

        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::EmitFailed);
        assert_eq!(scheduler.tick(&settings(true)), TickOutcome::EmitFailed);
    }

    #[tokio::test]
    async fn test_enable_reminders_follows_permission() {
        use wisdom_infrastructure::MemoryKeyValueStore;

        let progress = ProgressStore::new(Arc::new(MemoryKeyValueStore::new()));
        let time = NotificationTime::new(21, 15).unwrap();

        let granted = FakePlatform::new(PermissionStatus::Granted);
        let scheduler = NotificationScheduler::new(granted.clone(), FixedClock::at("2026-03-01 08:00:00"));
        assert_eq!(
            scheduler.enable_reminders(&progress, Some(time)).await,
            PermissionStatus::Granted
        );
        assert!(progress.load().notifications_enabled);
        assert_eq!(progress.load().notification_time, time);
        assert_eq!(granted.requests.load(Ordering::SeqCst), 0);

        let denied = FakePlatform::new(PermissionStatus::Denied);
        let scheduler = NotificationScheduler::new(denied.clone(), FixedClock::at("2026-03-01 08:00:00"));
        assert_eq!(
            scheduler.enable_reminders(&progress, None).await,
            PermissionStatus::Denied
        );
        assert!(!progress.load().notifications_enabled);
        assert_eq!(denied.requests.load(Ordering::SeqCst), 1);
    }
}
