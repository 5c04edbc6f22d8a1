//! Provider adapters for the five chat backends
//!
//! Three adapter implementations cover the five [`ProviderKind`] variants:
//! forge, `OpenAI` and the supervisor all speak the `OpenAI` wire format and
//! differ only in default host and auth policy.

mod anthropic;
mod ollama;
mod openai_compat;

pub use anthropic::AnthropicAdapter;
pub use ollama::OllamaAdapter;
pub use openai_compat::OpenAiCompatAdapter;

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::Stream;
use jarvis_config::{ProviderConfig, ProviderKind};

use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse, StreamEvent};

/// Stream of demultiplexed events from a provider
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// Default sampling temperature when the config does not set one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default completion token limit when the config does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Default request timeout when the config does not set one
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Trait implemented by each backend adapter
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which backend this adapter talks to
    fn kind(&self) -> ProviderKind;

    /// Send a non-streaming completion request
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Send a streaming completion request
    ///
    /// Errors raised here (before any byte has flowed) are fallback
    /// eligible; errors after are items on the returned stream.
    async fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, LlmError>;
}

impl std::fmt::Debug for dyn ProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter").field("kind", &self.kind()).finish()
    }
}

/// Build the adapter for the config's active provider
///
/// The match is exhaustive over [`ProviderKind`], so adding a backend is a
/// compile error until it is wired up here.
///
/// # Errors
///
/// Returns [`LlmError::MissingApiKey`] when the backend requires
/// credentials the config does not have; no network call is made.
pub fn build_adapter(http: &reqwest::Client, config: &ProviderConfig) -> Result<Box<dyn ProviderAdapter>, LlmError> {
    let adapter: Box<dyn ProviderAdapter> = match config.provider {
        ProviderKind::Forge => Box::new(OpenAiCompatAdapter::forge(http.clone(), config)),
        ProviderKind::Ollama => Box::new(OllamaAdapter::new(http.clone(), config)),
        ProviderKind::Openai => Box::new(OpenAiCompatAdapter::openai(http.clone(), config)?),
        ProviderKind::Anthropic => Box::new(AnthropicAdapter::new(http.clone(), config)?),
        ProviderKind::Supervisor => Box::new(OpenAiCompatAdapter::supervisor(http.clone(), config)),
    };
    Ok(adapter)
}

/// Default model id for a backend, used when the config leaves the model
/// unset or at the `"default"` sentinel
pub const fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Forge => "gpt-4o-mini",
        ProviderKind::Ollama => "llama3.2",
        ProviderKind::Openai => "gpt-4o",
        ProviderKind::Anthropic => "claude-3-5-sonnet-latest",
        ProviderKind::Supervisor => "jarvis-supervisor",
    }
}

/// Resolve the request timeout from config
pub(crate) fn request_timeout(config: &ProviderConfig) -> Duration {
    Duration::from_millis(config.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
}

/// Check a response status, converting non-2xx into [`LlmError::Upstream`]
/// with the provider name, status and body text
pub(crate) async fn check_status(provider: ProviderKind, response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(provider = %provider, status = %status, "upstream returned error");
    Err(LlmError::Upstream {
        provider,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_openai_key_fails_before_any_network_call() {
        let http = reqwest::Client::new();
        let config = ProviderConfig {
            provider: ProviderKind::Openai,
            ..ProviderConfig::default()
        };
        let err = build_adapter(&http, &config).unwrap_err();
        assert!(matches!(
            err,
            LlmError::MissingApiKey {
                provider: ProviderKind::Openai
            }
        ));
    }

    #[test]
    fn missing_anthropic_key_fails_before_any_network_call() {
        let http = reqwest::Client::new();
        let config = ProviderConfig {
            provider: ProviderKind::Anthropic,
            ..ProviderConfig::default()
        };
        let err = build_adapter(&http, &config).unwrap_err();
        assert!(matches!(
            err,
            LlmError::MissingApiKey {
                provider: ProviderKind::Anthropic
            }
        ));
    }

    #[test]
    fn unauthenticated_backends_build_without_keys() {
        let http = reqwest::Client::new();
        for kind in [ProviderKind::Forge, ProviderKind::Ollama, ProviderKind::Supervisor] {
            let config = ProviderConfig {
                provider: kind,
                ..ProviderConfig::default()
            };
            assert_eq!(build_adapter(&http, &config).unwrap().kind(), kind);
        }
    }
}
