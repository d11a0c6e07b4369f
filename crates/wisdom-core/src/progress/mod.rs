//! Reader progress domain module.
//!
//! # Module Structure
//!
//! - `model`: `UserState` and its value types
//! - `update`: partial updates and the shallow merge
//! - `operations`: domain operations expressed as updates

mod model;
pub mod operations;
mod update;

pub use model::{NotificationTime, Theme, UserState};
pub use update::UserStateUpdate;
