//! Adapter for the Anthropic Messages API

use async_trait::async_trait;
use futures_util::TryStreamExt;
use jarvis_config::{ProviderConfig, ProviderKind};
use secrecy::{ExposeSecret, SecretString};

use super::{EventStream, ProviderAdapter, check_status, request_timeout};
use crate::convert;
use crate::demux::{AnthropicDecoder, decode_body};
use crate::error::LlmError;
use crate::protocol::anthropic::{AnthropicRequest, AnthropicResponse};
use crate::types::{CompletionRequest, CompletionResponse};

/// Fixed Anthropic API host
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Adapter for the Anthropic backend
pub struct AnthropicAdapter {
    http: reqwest::Client,
    url: String,
    api_key: SecretString,
    timeout: std::time::Duration,
    timeout_streams: bool,
}

impl AnthropicAdapter {
    /// Create the adapter from per-call config
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no key is configured; no
    /// network call is made.
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        let endpoint = config.endpoint(ProviderKind::Anthropic);
        let api_key = endpoint.api_key.clone().ok_or(LlmError::MissingApiKey {
            provider: ProviderKind::Anthropic,
        })?;

        let base = endpoint.api_url.as_ref().map_or(ANTHROPIC_BASE_URL, url::Url::as_str);
        Ok(Self {
            http,
            url: format!("{}/v1/messages", base.trim_end_matches('/')),
            api_key,
            timeout: request_timeout(config),
            timeout_streams: config.timeout_streams,
        })
    }

    fn request(&self, wire: &AnthropicRequest, streaming: bool) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .post(&self.url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(wire);

        if !streaming || self.timeout_streams {
            builder = builder.timeout(self.timeout);
        }
        builder
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let wire: AnthropicRequest = request.into();

        let response = self.request(&wire, false).send().await.map_err(|e| {
            tracing::error!(provider = %self.kind(), error = %e, "upstream request failed");
            LlmError::transport(ProviderKind::Anthropic, &e)
        })?;
        let response = check_status(ProviderKind::Anthropic, response).await?;

        let wire_response: AnthropicResponse = response.json().await.map_err(|e| LlmError::InvalidResponse {
            provider: ProviderKind::Anthropic,
            message: e.to_string(),
        })?;

        Ok(convert::anthropic::normalize(wire_response))
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, LlmError> {
        let mut wire: AnthropicRequest = request.into();
        wire.stream = Some(true);

        let response = self.request(&wire, true).send().await.map_err(|e| {
            tracing::error!(provider = %self.kind(), error = %e, "upstream stream request failed");
            LlmError::transport(ProviderKind::Anthropic, &e)
        })?;
        let response = check_status(ProviderKind::Anthropic, response).await?;

        let body = response.bytes_stream().map_err(|e| e.to_string());
        Ok(Box::pin(decode_body(body, AnthropicDecoder::new())))
    }
}
