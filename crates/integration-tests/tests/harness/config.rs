//! Programmatic configuration builder for integration tests

use jarvis_config::{ProviderConfig, ProviderKind};
use secrecy::SecretString;
use url::Url;

/// Builder for constructing test provider configurations
pub struct ConfigBuilder {
    config: ProviderConfig,
}

impl ConfigBuilder {
    /// Create a builder with `provider` as the primary backend
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            config: ProviderConfig {
                provider,
                ..ProviderConfig::default()
            },
        }
    }

    /// Point a backend's endpoint at a mock server
    pub fn endpoint(mut self, kind: ProviderKind, base_url: &str) -> Self {
        self.config.endpoint_mut(kind).api_url = Some(Url::parse(base_url).expect("valid mock URL"));
        self
    }

    /// Set a backend's API key
    pub fn api_key(mut self, kind: ProviderKind, key: &str) -> Self {
        self.config.endpoint_mut(kind).api_key = Some(SecretString::from(key.to_owned()));
        self
    }

    /// Set a backend's model
    pub fn model(mut self, kind: ProviderKind, model: &str) -> Self {
        self.config.endpoint_mut(kind).model = Some(model.to_owned());
        self
    }

    /// Turn off streaming for the configured provider
    pub fn no_streaming(mut self) -> Self {
        self.config.stream_enabled = false;
        self
    }

    /// Enable the single fallback hop to `kind`
    pub fn fallback(mut self, kind: ProviderKind) -> Self {
        self.config.fallback_enabled = true;
        self.config.fallback_provider = Some(kind);
        self
    }

    /// Finish building
    pub fn build(self) -> ProviderConfig {
        self.config
    }
}
