//! Adapter for the local Ollama model server

use async_trait::async_trait;
use futures_util::TryStreamExt;
use jarvis_config::{ProviderConfig, ProviderKind};

use super::{EventStream, ProviderAdapter, check_status, request_timeout};
use crate::convert;
use crate::demux::{OllamaDecoder, decode_body};
use crate::error::LlmError;
use crate::protocol::ollama::{OllamaRequest, OllamaResponse};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default Ollama address
const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Adapter for the local model server; never sends credentials
pub struct OllamaAdapter {
    http: reqwest::Client,
    url: String,
    timeout: std::time::Duration,
    timeout_streams: bool,
}

impl OllamaAdapter {
    /// Create the adapter from per-call config
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        let endpoint = config.endpoint(ProviderKind::Ollama);
        let base = endpoint.api_url.as_ref().map_or(OLLAMA_BASE_URL, url::Url::as_str);
        Self {
            http,
            url: format!("{}/api/chat", base.trim_end_matches('/')),
            timeout: request_timeout(config),
            timeout_streams: config.timeout_streams,
        }
    }

    fn request(&self, wire: &OllamaRequest) -> reqwest::RequestBuilder {
        let mut builder = self.http.post(&self.url).json(wire);
        if !wire.stream || self.timeout_streams {
            builder = builder.timeout(self.timeout);
        }
        builder
    }
}

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        // Ollama streams unless stream=false is explicit
        let mut wire: OllamaRequest = request.into();
        wire.stream = false;

        let response = self.request(&wire).send().await.map_err(|e| {
            tracing::error!(provider = %self.kind(), error = %e, "upstream request failed");
            LlmError::transport(ProviderKind::Ollama, &e)
        })?;
        let response = check_status(ProviderKind::Ollama, response).await?;

        let wire_response: OllamaResponse = response.json().await.map_err(|e| LlmError::InvalidResponse {
            provider: ProviderKind::Ollama,
            message: e.to_string(),
        })?;

        Ok(convert::ollama::normalize(wire_response, &request.model))
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, LlmError> {
        let mut wire: OllamaRequest = request.into();
        wire.stream = true;

        let response = self.request(&wire).send().await.map_err(|e| {
            tracing::error!(provider = %self.kind(), error = %e, "upstream stream request failed");
            LlmError::transport(ProviderKind::Ollama, &e)
        })?;
        let response = check_status(ProviderKind::Ollama, response).await?;

        let body = response.bytes_stream().map_err(|e| e.to_string());
        Ok(Box::pin(decode_body(body, OllamaDecoder)))
    }
}
