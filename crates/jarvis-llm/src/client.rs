//! Public entry points and the fallback controller
//!
//! [`LlmClient::invoke`] and [`LlmClient::stream`] wrap the provider
//! adapters with an explicit two-attempt sequence: the primary provider,
//! then at most one hop to the configured fallback. The hop count is fixed
//! by the control flow here, not by a flag check at recursion time.

use futures_util::StreamExt;
use jarvis_config::ProviderConfig;

use crate::error::LlmError;
use crate::provider::{self, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, EventStream, build_adapter};
use crate::types::{CompletionRequest, CompletionResponse, InvokeOptions, Message, StreamChunk, StreamEvent};

/// Client for the five chat backends
///
/// Holds only the shared HTTP connection pool; all per-call state arrives
/// in the [`ProviderConfig`], so one client serves concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct LlmClient {
    http: reqwest::Client,
}

impl LlmClient {
    /// Create a client with a fresh connection pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a non-streaming chat completion
    ///
    /// # Errors
    ///
    /// Returns the primary provider's error when fallback is not eligible,
    /// or the fallback provider's error when the single fallback hop also
    /// fails.
    pub async fn invoke(
        &self,
        config: &ProviderConfig,
        messages: &[Message],
        options: InvokeOptions,
    ) -> Result<CompletionResponse, LlmError> {
        match self.attempt_complete(config, messages, options).await {
            Ok(response) => Ok(response),
            Err(primary_error) => match config.fallback() {
                Some(fallback_config) => {
                    tracing::warn!(
                        provider = %config.provider,
                        fallback = %fallback_config.provider,
                        error = %primary_error,
                        "primary provider failed, attempting fallback"
                    );
                    self.attempt_complete(&fallback_config, messages, options).await
                }
                None => Err(primary_error),
            },
        }
    }

    /// Send a streaming chat completion, delivering chunks to `on_chunk`
    ///
    /// Never returns an error: every failure, including fallback
    /// exhaustion, is delivered as a terminal [`StreamChunk::Error`].
    /// Exactly one terminal chunk (`Done` or `Error`) is delivered per
    /// call, and nothing follows it.
    pub async fn stream<F>(&self, config: &ProviderConfig, messages: &[Message], options: InvokeOptions, mut on_chunk: F)
    where
        F: FnMut(StreamChunk) + Send,
    {
        let opened = match self.attempt_stream(config, messages, options).await {
            Ok(stream) => Ok(stream),
            Err(primary_error) => match config.fallback() {
                Some(fallback_config) => {
                    tracing::warn!(
                        provider = %config.provider,
                        fallback = %fallback_config.provider,
                        error = %primary_error,
                        "primary provider failed to open stream, attempting fallback"
                    );
                    self.attempt_stream(&fallback_config, messages, options).await
                }
                None => Err(primary_error),
            },
        };

        let mut events = match opened {
            Ok(stream) => stream,
            Err(error) => {
                on_chunk(StreamChunk::Error {
                    error: error.to_string(),
                });
                return;
            }
        };

        while let Some(event) = events.next().await {
            match event {
                Ok(StreamEvent::Content(content)) => on_chunk(StreamChunk::Content { content }),
                Ok(StreamEvent::Done(usage)) => {
                    on_chunk(StreamChunk::Done { usage });
                    return;
                }
                // Mid-stream failure: bytes already flowed, no fallback
                Err(error) => {
                    on_chunk(StreamChunk::Error {
                        error: error.to_string(),
                    });
                    return;
                }
            }
        }

        // Body ended without a terminal frame; close the stream anyway
        on_chunk(StreamChunk::Done { usage: None });
    }

    /// One non-streaming attempt against the config's active provider
    async fn attempt_complete(
        &self,
        config: &ProviderConfig,
        messages: &[Message],
        options: InvokeOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let adapter = build_adapter(&self.http, config)?;
        let request = resolve_request(config, messages, options, false);
        adapter.complete(&request).await
    }

    /// One stream-open attempt against the config's active provider
    async fn attempt_stream(
        &self,
        config: &ProviderConfig,
        messages: &[Message],
        options: InvokeOptions,
    ) -> Result<EventStream, LlmError> {
        let adapter = build_adapter(&self.http, config)?;
        let request = resolve_request(config, messages, options, true);
        adapter.complete_stream(&request).await
    }
}

/// Apply config, per-call overrides and per-provider defaults
fn resolve_request(
    config: &ProviderConfig,
    messages: &[Message],
    options: InvokeOptions,
    stream: bool,
) -> CompletionRequest {
    let endpoint = config.endpoint(config.provider);
    let model = endpoint
        .model_override()
        .unwrap_or_else(|| provider::default_model(config.provider));

    CompletionRequest {
        model: model.to_owned(),
        messages: messages.to_vec(),
        temperature: options
            .temperature
            .or_else(|| config.resolved_temperature())
            .unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: options.max_tokens.or(config.max_tokens).unwrap_or(DEFAULT_MAX_TOKENS),
        stream,
    }
}
