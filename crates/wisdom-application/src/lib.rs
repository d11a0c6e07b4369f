//! Application services: content delivery and daily reminders.

pub mod content_fetcher;
pub mod delivery;
pub mod notification_scheduler;

pub use content_fetcher::{ContentFetcher, DEFAULT_FETCH_TIMEOUT};
pub use delivery::ContentDeliveryCoordinator;
pub use notification_scheduler::{NotificationScheduler, TickOutcome};
