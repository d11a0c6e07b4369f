//! Daily content domain module.
//!
//! # Module Structure
//!
//! - `model`: `DailyContent` and its verse list
//! - `provider`: the external generation service seam
//! - `error`: classified fetch failures

mod error;
mod model;
mod provider;

pub use error::{FetchError, ProviderFailure};
pub use model::{DailyContent, ScriptureVerse, TextSpan, parse_bold_spans};
pub use provider::{ContentProvider, ContentRequest};
