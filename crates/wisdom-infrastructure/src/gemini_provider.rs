//! Gemini REST content provider.
//!
//! Calls `models/{model}:generateContent` with a JSON response schema
//! describing the daily content layout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use wisdom_core::config::ProviderSettings;
use wisdom_core::content::{ContentProvider, ContentRequest, ProviderFailure};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// [`ContentProvider`] backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
    top_k: u32,
}

impl GeminiProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            client: Client::new(),
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            temperature: settings.temperature,
            top_k: settings.top_k,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: content_schema(),
                temperature: self.temperature,
                top_k: self.top_k,
            },
        }
    }

    async fn send_request(
        &self,
        credential: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, ProviderFailure> {
        // The key travels in a header so it never shows up in a logged URL.
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, credential)
            .json(body)
            .send()
            .await
            .map_err(|err| ProviderFailure::Unavailable {
                status: None,
                message: format!("Gemini API request failed: {}", err.without_url()),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            ProviderFailure::Malformed(format!("Failed to parse Gemini response: {}", err.without_url()))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn generate(
        &self,
        request: &ContentRequest,
        cancel: CancellationToken,
    ) -> Result<String, ProviderFailure> {
        let body = self.build_request(&request.prompt);
        debug!(day = %request.day, model = %self.model, "requesting content from Gemini");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderFailure::Cancelled),
            result = self.send_request(&request.credential, &body) => result,
        }
    }
}

/// Response schema: every field of the daily content except the day,
/// which the caller already knows.
fn content_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scriptureReference": {
                "type": "STRING",
                "description": "e.g., Provérbios 1"
            },
            "scriptureVerses": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "verse": { "type": "INTEGER" },
                        "text": { "type": "STRING" }
                    },
                    "required": ["verse", "text"]
                },
                "description": "Lista completa dos versículos."
            },
            "interpretation": {
                "type": "STRING",
                "description": "Interpretação concisa (3 frases). Use markdown bold (**texto**)."
            },
            "practicalSteps": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": 3,
                "maxItems": 3,
                "description": "Exatamente 3 passos práticos e curtos. Use markdown bold (**texto**)."
            },
            "reflectionQuestion": {
                "type": "STRING",
                "description": "Pergunta de reflexão única baseada no capítulo. USE **negrito**."
            },
            "historicalCuriosity": {
                "type": "STRING",
                "description": "Fato histórico ou cultural ligado a este capítulo, nada genérico sobre o livro."
            }
        },
        "required": [
            "scriptureReference",
            "scriptureVerses",
            "interpretation",
            "practicalSteps",
            "reflectionQuestion",
            "historicalCuriosity"
        ]
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
    temperature: f32,
    top_k: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: Vec<Value>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, ProviderFailure> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(ProviderFailure::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: &str) -> ProviderFailure {
    let parsed = serde_json::from_str::<ErrorWrapper>(body).ok();

    let key_invalid = parsed.as_ref().is_some_and(|wrapper| {
        wrapper
            .error
            .details
            .iter()
            .any(|detail| detail.get("reason").and_then(Value::as_str) == Some("API_KEY_INVALID"))
    }) || body.contains("API_KEY_INVALID");

    let message = parsed
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderFailure::CredentialRejected(message),
        StatusCode::BAD_REQUEST if key_invalid => ProviderFailure::CredentialRejected(message),
        _ => ProviderFailure::Unavailable {
            status: Some(status.as_u16()),
            message,
        },
    }
}
