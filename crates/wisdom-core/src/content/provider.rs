//! Content provider trait.
//!
//! Defines the contract with the external generative service.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::ProviderFailure;
use crate::day::Day;

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub day: Day,
    /// Resolved credential. Never logged.
    pub credential: String,
    /// Prompt text, built from `day` alone.
    pub prompt: String,
}

/// The external service that turns a day into devotional content.
///
/// Implementations return the raw response text; parsing into
/// [`super::DailyContent`] is the fetcher's job so every provider gets the
/// same fence stripping and validation.
///
/// # Cancellation
///
/// `cancel` fires when the caller stops waiting (e.g. the timeout won the
/// race). Implementations must stop their in-flight work and return
/// [`ProviderFailure::Cancelled`] promptly.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate(
        &self,
        request: &ContentRequest,
        cancel: CancellationToken,
    ) -> Result<String, ProviderFailure>;
}
