use jarvis_config::ProviderKind;
use thiserror::Error;

/// Errors that can occur while talking to an LLM backend
///
/// Every variant is eligible for the one-hop fallback; the distinction
/// matters for what callers see after fallback is exhausted.
#[derive(Debug, Error)]
pub enum LlmError {
    /// A required API key is missing; raised before any network call
    #[error("missing API key for provider {provider}")]
    MissingApiKey {
        /// Provider that requires credentials
        provider: ProviderKind,
    },

    /// The provider returned a non-2xx response
    #[error("provider {provider} returned {status}: {body}")]
    Upstream {
        /// Provider that answered
        provider: ProviderKind,
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The request never completed (connect failure, timeout, abort)
    #[error("request to provider {provider} failed: {message}")]
    Transport {
        /// Provider being called
        provider: ProviderKind,
        /// Underlying transport error text
        message: String,
    },

    /// The provider answered 2xx but the body was not parseable
    #[error("unexpected response from provider {provider}: {message}")]
    InvalidResponse {
        /// Provider that answered
        provider: ProviderKind,
        /// Parse error text
        message: String,
    },

    /// Error while reading a streaming response body
    #[error("streaming error: {0}")]
    Streaming(String),
}

impl LlmError {
    /// Wrap a reqwest error from a call to `provider`
    pub fn transport(provider: ProviderKind, error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("timed out: {error}")
        } else {
            error.to_string()
        };
        Self::Transport { provider, message }
    }
}
