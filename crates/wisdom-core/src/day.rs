//! The curriculum day.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WisdomError};

/// Number of days in the curriculum (one chapter of Proverbs per day).
pub const CURRICULUM_DAYS: u8 = 31;

/// A day of the 31-day curriculum.
///
/// Construction is the only place the `1..=31` bound is checked, so every
/// `Day` held by the rest of the system is in range. Serializes as a plain
/// integer, which also makes it usable as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    pub const FIRST: Day = Day(1);
    pub const LAST: Day = Day(CURRICULUM_DAYS);

    /// Creates a day, rejecting anything outside `1..=31`.
    pub fn new(value: i64) -> Result<Self> {
        if (1..=i64::from(CURRICULUM_DAYS)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(WisdomError::InvalidDay(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The following day, or `None` on the last day.
    pub fn next(self) -> Option<Day> {
        (self.0 < CURRICULUM_DAYS).then(|| Day(self.0 + 1))
    }

    /// The preceding day, or `None` on the first day.
    pub fn previous(self) -> Option<Day> {
        (self.0 > 1).then(|| Day(self.0 - 1))
    }

    /// Iterates every day of the curriculum in order.
    pub fn all() -> impl Iterator<Item = Day> {
        (1..=CURRICULUM_DAYS).map(Day)
    }
}

impl Default for Day {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Day {
    type Error = WisdomError;

    fn try_from(value: u8) -> Result<Self> {
        Day::new(i64::from(value))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
