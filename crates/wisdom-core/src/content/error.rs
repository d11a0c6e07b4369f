//! Classified fetch errors.

use std::time::Duration;

use thiserror::Error;

/// What went wrong on the provider side of a fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    /// The provider refused the credential (invalid, revoked, no access).
    #[error("credential rejected by provider: {0}")]
    CredentialRejected(String),

    /// Network failure, rate limit or server error.
    #[error("provider unavailable (status {status:?}): {message}")]
    Unavailable {
        status: Option<u16>,
        message: String,
    },

    /// The provider answered without any text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The response text did not parse as daily content.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The request was cancelled before the provider answered.
    #[error("provider request cancelled")]
    Cancelled,
}

/// Classified outcome of a failed fetch.
///
/// These are surfaced verbatim to the presentation layer, which decides on
/// the retry or credential-entry affordance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No user-supplied or default credential is configured.
    #[error("no API credential configured")]
    MissingCredential,

    /// The provider did not answer within the deadline.
    #[error("provider did not respond within {}s", .after.as_secs())]
    Timeout { after: Duration },

    /// Malformed or missing response body, or a provider-side failure.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderFailure),
}

impl FetchError {
    /// Whether re-invoking the fetch unchanged may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::MissingCredential => false,
            Self::Timeout { .. } => true,
            Self::Provider(ProviderFailure::CredentialRejected(_)) => false,
            Self::Provider(_) => true,
        }
    }

    /// Whether the reader should be offered a credential-entry form.
    pub fn needs_credential(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::Provider(ProviderFailure::CredentialRejected(_))
        )
    }

    /// Reader-facing copy for the error screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => {
                "Informe sua chave de API para carregar o capítulo."
            }
            Self::Timeout { .. } => {
                "O tempo de espera esgotou. A sabedoria requer paciência, mas sua conexão pode estar lenta."
            }
            Self::Provider(_) => {
                "Não foi possível carregar o capítulo. Verifique sua chave de API e conexão."
            }
        }
    }
}
