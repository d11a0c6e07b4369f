//! Content fetching with a deadline.
//!
//! One provider call per fetch, raced against a timer. The losing provider
//! call is cancelled through its token; nothing is retried here.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wisdom_core::Day;
use wisdom_core::content::{
    ContentProvider, ContentRequest, DailyContent, FetchError, ProviderFailure, ScriptureVerse,
};

/// Default deadline for one provider call.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(45);

/// Builds the generation prompt. Depends on nothing but the day.
pub fn build_prompt(day: Day) -> String {
    format!(
        "JSON para Provérbios Capítulo {day}.\n\
         Requisitos:\n\
         1. 'scriptureVerses': Array com TODOS os versículos do cap {day} (NVI).\n\
         2. 'interpretation': Foco em inteligência emocional.\n\
         3. 'practicalSteps': Exatamente 3 passos práticos.\n\
         4. 'reflectionQuestion': Pergunta baseada no tema do capítulo.\n\
         5. 'historicalCuriosity': Fato histórico ou cultural ligado a este capítulo \
         (ex: leis, costumes). Nada genérico sobre Salomão ou o livro de Provérbios.\n"
    )
}

/// Removes a surrounding Markdown code fence, if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Provider payload: the content without its day.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedContent {
    scripture_reference: String,
    #[serde(default)]
    scripture_verses: Vec<ScriptureVerse>,
    interpretation: String,
    practical_steps: Vec<String>,
    reflection_question: String,
    historical_curiosity: String,
}

/// Parses provider text into the content for `day`.
pub fn parse_content(day: Day, text: &str) -> Result<DailyContent, ProviderFailure> {
    let generated: GeneratedContent = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| ProviderFailure::Malformed(e.to_string()))?;

    Ok(DailyContent {
        day,
        scripture_reference: generated.scripture_reference,
        scripture_verses: generated.scripture_verses,
        interpretation: generated.interpretation,
        practical_steps: generated.practical_steps,
        reflection_question: generated.reflection_question,
        historical_curiosity: generated.historical_curiosity,
    }
    .with_sorted_verses())
}

/// Fetches one day's content from a [`ContentProvider`].
pub struct ContentFetcher {
    provider: Arc<dyn ContentProvider>,
    timeout: Duration,
}

impl ContentFetcher {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches content for `day` with an already-resolved credential.
    ///
    /// A missing or blank credential fails before any provider call.
    pub async fn fetch(&self, day: Day, credential: Option<&str>) -> Result<DailyContent, FetchError> {
        let credential = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(FetchError::MissingCredential)?;

        let request = ContentRequest {
            day,
            credential: credential.to_string(),
            prompt: build_prompt(day),
        };

        let cancel = CancellationToken::new();
        info!(%day, timeout_secs = self.timeout.as_secs(), "fetching daily content");

        let text = tokio::select! {
            result = self.provider.generate(&request, cancel.clone()) => result?,
            _ = tokio::time::sleep(self.timeout) => {
                cancel.cancel();
                warn!(%day, "provider timed out");
                return Err(FetchError::Timeout { after: self.timeout });
            }
        };

        let content = parse_content(day, &text).inspect_err(|e| {
            warn!(%day, error = %e, "provider response did not parse");
        })?;
        debug!(%day, verses = content.scripture_verses.len(), "daily content fetched");
        Ok(content)
    }
}
