//! UserState domain model.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::day::{CURRICULUM_DAYS, Day};
use crate::error::{Result, WisdomError};

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Daily reminder time, 24-hour clock.
///
/// Serialized as `"HH:MM"`. A value of this type is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationTime {
    hour: u8,
    minute: u8,
}

impl NotificationTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour < 24 && minute < 60 {
            Ok(Self { hour, minute })
        } else {
            Err(WisdomError::InvalidTime(format!("{hour:02}:{minute:02}")))
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// True when `time` falls inside this hour and minute.
    pub fn matches(self, time: NaiveTime) -> bool {
        time.hour() == u32::from(self.hour) && time.minute() == u32::from(self.minute)
    }
}

impl Default for NotificationTime {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

impl FromStr for NotificationTime {
    type Err = WisdomError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || WisdomError::InvalidTime(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for NotificationTime {
    type Error = WisdomError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<NotificationTime> for String {
    fn from(time: NotificationTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// The reader's durable state.
///
/// Owned by the progress store; everything else reads snapshots and asks
/// for changes through a [`super::UserStateUpdate`].
///
/// # Persisted form
///
/// One JSON blob with camelCase keys. Sets and maps are ordered, so
/// `completedDays` and `favorites` serialize as ascending arrays without
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub name: String,
    pub current_day: Day,
    pub completed_days: BTreeSet<Day>,
    pub journal_entries: BTreeMap<Day, String>,
    pub favorites: BTreeSet<Day>,
    pub theme: Theme,
    pub is_onboarded: bool,
    pub notifications_enabled: bool,
    pub notification_time: NotificationTime,
    /// User-supplied API credential; overrides the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_credential: Option<String>,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            name: String::new(),
            current_day: Day::FIRST,
            completed_days: BTreeSet::new(),
            journal_entries: BTreeMap::new(),
            favorites: BTreeSet::new(),
            theme: Theme::Light,
            is_onboarded: false,
            notifications_enabled: false,
            notification_time: NotificationTime::default(),
            custom_credential: None,
        }
    }
}

impl UserState {
    pub fn is_completed(&self, day: Day) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn is_favorite(&self, day: Day) -> bool {
        self.favorites.contains(&day)
    }

    pub fn journal_entry(&self, day: Day) -> Option<&str> {
        self.journal_entries.get(&day).map(String::as_str)
    }

    /// Completed share of the curriculum, rounded to a whole percent.
    pub fn completion_percent(&self) -> u8 {
        let completed = self.completed_days.len() as f64;
        (completed / f64::from(CURRICULUM_DAYS) * 100.0).round() as u8
    }

    /// Journal entries, most recent day first.
    pub fn journal_newest_first(&self) -> impl Iterator<Item = (Day, &str)> {
        self.journal_entries
            .iter()
            .rev()
            .map(|(day, text)| (*day, text.as_str()))
    }
}
