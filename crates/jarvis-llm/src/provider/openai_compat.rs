//! Adapter for OpenAI-wire-format backends: forge, `OpenAI`, supervisor

use async_trait::async_trait;
use futures_util::TryStreamExt;
use jarvis_config::{ProviderConfig, ProviderKind};
use secrecy::{ExposeSecret, SecretString};

use super::{EventStream, ProviderAdapter, check_status, request_timeout};
use crate::convert;
use crate::demux::{OpenAiDecoder, decode_body};
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default base URL for the hosted forge gateway
const FORGE_BASE_URL: &str = "https://api.forgeai.dev";
/// Fixed `OpenAI` API host
const OPENAI_BASE_URL: &str = "https://api.openai.com";
/// Default base URL for the local supervisor
const SUPERVISOR_BASE_URL: &str = "http://localhost:8085";

/// Auth policy for an OpenAI-compatible backend
enum Auth {
    /// Bearer token when a key is configured, nothing otherwise (forge)
    Optional(Option<SecretString>),
    /// Bearer token, key must be present (`OpenAI`)
    Bearer(SecretString),
    /// Never send credentials (supervisor)
    None,
}

/// Adapter for the three OpenAI-compatible backends
pub struct OpenAiCompatAdapter {
    kind: ProviderKind,
    http: reqwest::Client,
    url: String,
    auth: Auth,
    timeout: std::time::Duration,
    timeout_streams: bool,
}

impl OpenAiCompatAdapter {
    /// Adapter for the hosted forge gateway
    pub fn forge(http: reqwest::Client, config: &ProviderConfig) -> Self {
        let endpoint = config.endpoint(ProviderKind::Forge);
        Self {
            kind: ProviderKind::Forge,
            http,
            url: completions_url(endpoint.api_url.as_ref().map_or(FORGE_BASE_URL, url::Url::as_str)),
            auth: Auth::Optional(endpoint.api_key.clone()),
            timeout: request_timeout(config),
            timeout_streams: config.timeout_streams,
        }
    }

    /// Adapter for the `OpenAI` API
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no key is configured.
    pub fn openai(http: reqwest::Client, config: &ProviderConfig) -> Result<Self, LlmError> {
        let endpoint = config.endpoint(ProviderKind::Openai);
        let key = endpoint.api_key.clone().ok_or(LlmError::MissingApiKey {
            provider: ProviderKind::Openai,
        })?;
        Ok(Self {
            kind: ProviderKind::Openai,
            http,
            url: completions_url(endpoint.api_url.as_ref().map_or(OPENAI_BASE_URL, url::Url::as_str)),
            auth: Auth::Bearer(key),
            timeout: request_timeout(config),
            timeout_streams: config.timeout_streams,
        })
    }

    /// Adapter for the local supervisor
    pub fn supervisor(http: reqwest::Client, config: &ProviderConfig) -> Self {
        let endpoint = config.endpoint(ProviderKind::Supervisor);
        Self {
            kind: ProviderKind::Supervisor,
            http,
            url: completions_url(endpoint.api_url.as_ref().map_or(SUPERVISOR_BASE_URL, url::Url::as_str)),
            auth: Auth::None,
            timeout: request_timeout(config),
            timeout_streams: config.timeout_streams,
        }
    }

    fn request(&self, wire: &OpenAiRequest, streaming: bool) -> reqwest::RequestBuilder {
        let mut builder = self.http.post(&self.url).json(wire);

        if !streaming || self.timeout_streams {
            builder = builder.timeout(self.timeout);
        }

        match &self.auth {
            Auth::Optional(Some(key)) | Auth::Bearer(key) => builder.bearer_auth(key.expose_secret()),
            Auth::Optional(None) | Auth::None => builder,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let wire: OpenAiRequest = request.into();

        let response = self.request(&wire, false).send().await.map_err(|e| {
            tracing::error!(provider = %self.kind, error = %e, "upstream request failed");
            LlmError::transport(self.kind, &e)
        })?;
        let response = check_status(self.kind, response).await?;

        let wire_response: OpenAiResponse = response.json().await.map_err(|e| LlmError::InvalidResponse {
            provider: self.kind,
            message: e.to_string(),
        })?;

        Ok(convert::openai::normalize(self.kind, wire_response))
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, LlmError> {
        let mut wire: OpenAiRequest = request.into();
        wire.stream = Some(true);

        let response = self.request(&wire, true).send().await.map_err(|e| {
            tracing::error!(provider = %self.kind, error = %e, "upstream stream request failed");
            LlmError::transport(self.kind, &e)
        })?;
        let response = check_status(self.kind, response).await?;

        let body = response.bytes_stream().map_err(|e| e.to_string());
        Ok(Box::pin(decode_body(body, OpenAiDecoder::new())))
    }
}

/// Append the chat completions path to a base URL
fn completions_url(base: &str) -> String {
    format!("{}/v1/chat/completions", base.trim_end_matches('/'))
}
