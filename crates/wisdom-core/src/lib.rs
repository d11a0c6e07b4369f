//! Domain model and service seams for Wisdom Journey.
//!
//! This crate has no I/O of its own. Storage, the content provider and the
//! notification platform are traits implemented by the infrastructure crate
//! (or by test doubles).

pub mod clock;
pub mod config;
pub mod content;
pub mod credential;
pub mod day;
pub mod error;
pub mod notification;
pub mod progress;
pub mod storage;

pub use day::{CURRICULUM_DAYS, Day};
pub use error::{Result, WisdomError};
