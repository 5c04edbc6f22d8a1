use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Sentinel model name meaning "use the provider's default model"
pub const DEFAULT_MODEL_SENTINEL: &str = "default";

/// The chat backends Jarvis can route a request to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderKind {
    /// Hosted Jarvis gateway (OpenAI-compatible)
    Forge,
    /// Local Ollama server
    Ollama,
    /// OpenAI API
    Openai,
    /// Anthropic Messages API
    Anthropic,
    /// Local supervisor model (OpenAI-compatible, unauthenticated)
    Supervisor,
}

/// Per-call provider configuration
///
/// Built once per request from the caller's settings and immutable for the
/// duration of the call. Endpoint details for every backend travel with the
/// config so a fallback hop can switch providers without re-resolving
/// credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Backend handling the request
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    /// Sampling temperature; callers may supply either a 0..=1 fraction or a
    /// 0..=100 slider value (see [`ProviderConfig::resolved_temperature`])
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Apply `timeout_ms` to streaming requests as well
    ///
    /// Off by default: a healthy stream can legitimately outlive the
    /// non-streaming timeout.
    #[serde(default)]
    pub timeout_streams: bool,
    /// Allow callers to request streaming responses
    #[serde(default = "default_true")]
    pub stream_enabled: bool,
    /// Retry once against `fallback_provider` when the primary fails
    #[serde(default)]
    pub fallback_enabled: bool,
    /// Backend to fall back to
    #[serde(default)]
    pub fallback_provider: Option<ProviderKind>,
    /// Endpoint settings per backend
    #[serde(default)]
    pub endpoints: ProviderEndpoints,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            temperature: None,
            max_tokens: None,
            timeout_ms: None,
            timeout_streams: false,
            stream_enabled: true,
            fallback_enabled: false,
            fallback_provider: None,
            endpoints: ProviderEndpoints::default(),
        }
    }
}

const fn default_provider() -> ProviderKind {
    ProviderKind::Forge
}

const fn default_true() -> bool {
    true
}

impl ProviderConfig {
    /// Endpoint settings for a backend
    pub const fn endpoint(&self, kind: ProviderKind) -> &EndpointConfig {
        match kind {
            ProviderKind::Forge => &self.endpoints.forge,
            ProviderKind::Ollama => &self.endpoints.ollama,
            ProviderKind::Openai => &self.endpoints.openai,
            ProviderKind::Anthropic => &self.endpoints.anthropic,
            ProviderKind::Supervisor => &self.endpoints.supervisor,
        }
    }

    /// Mutable endpoint settings for a backend
    pub const fn endpoint_mut(&mut self, kind: ProviderKind) -> &mut EndpointConfig {
        match kind {
            ProviderKind::Forge => &mut self.endpoints.forge,
            ProviderKind::Ollama => &mut self.endpoints.ollama,
            ProviderKind::Openai => &mut self.endpoints.openai,
            ProviderKind::Anthropic => &mut self.endpoints.anthropic,
            ProviderKind::Supervisor => &mut self.endpoints.supervisor,
        }
    }

    /// Derive the config for the single permitted fallback hop
    ///
    /// Returns `None` when fallback is disabled, unset, or would re-target
    /// the provider that just failed. The derived config has fallback
    /// disabled, so a second hop is impossible by construction.
    pub fn fallback(&self) -> Option<Self> {
        if !self.fallback_enabled {
            return None;
        }
        let fallback = self.fallback_provider?;
        if fallback == self.provider {
            return None;
        }
        Some(Self {
            provider: fallback,
            fallback_enabled: false,
            fallback_provider: None,
            ..self.clone()
        })
    }

    /// Temperature normalized to the 0..=1 range providers expect
    ///
    /// Dashboard sliders store 0..=100; anything above 1 is treated as a
    /// percentage.
    pub fn resolved_temperature(&self) -> Option<f64> {
        self.temperature.map(|t| if t > 1.0 { (t / 100.0).min(1.0) } else { t })
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error when sampling parameters are out of range.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(t) = self.temperature
            && !(0.0..=100.0).contains(&t)
        {
            anyhow::bail!("llm.temperature must be within 0..=1 (or a 0..=100 slider value), got {t}");
        }
        if self.max_tokens == Some(0) {
            anyhow::bail!("llm.max_tokens must be greater than zero");
        }
        if self.fallback_enabled
            && let Some(fallback) = self.fallback_provider
            && fallback == self.provider
        {
            anyhow::bail!("llm.fallback_provider must differ from llm.provider");
        }
        Ok(())
    }
}

/// Endpoint settings for every backend
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEndpoints {
    /// Hosted gateway
    #[serde(default)]
    pub forge: EndpointConfig,
    /// Local Ollama server
    #[serde(default)]
    pub ollama: EndpointConfig,
    /// OpenAI
    #[serde(default)]
    pub openai: EndpointConfig,
    /// Anthropic
    #[serde(default)]
    pub anthropic: EndpointConfig,
    /// Local supervisor
    #[serde(default)]
    pub supervisor: EndpointConfig,
}

/// Connection settings for a single backend
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Base URL override
    #[serde(default)]
    pub api_url: Option<Url>,
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model identifier; `"default"` (or absent) selects the backend's
    /// built-in default
    #[serde(default)]
    pub model: Option<String>,
}

impl EndpointConfig {
    /// Model override, treating the `"default"` sentinel as unset
    pub fn model_override(&self) -> Option<&str> {
        self.model
            .as_deref()
            .filter(|m| !m.is_empty() && *m != DEFAULT_MODEL_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_fallback(primary: ProviderKind, fallback: Option<ProviderKind>, enabled: bool) -> ProviderConfig {
        ProviderConfig {
            provider: primary,
            fallback_enabled: enabled,
            fallback_provider: fallback,
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn fallback_derivation_switches_provider_once() {
        let config = config_with_fallback(ProviderKind::Forge, Some(ProviderKind::Ollama), true);
        let derived = config.fallback().unwrap();
        assert_eq!(derived.provider, ProviderKind::Ollama);
        assert!(!derived.fallback_enabled);
        // A second hop is impossible
        assert!(derived.fallback().is_none());
    }

    #[test]
    fn fallback_disabled_yields_none() {
        let config = config_with_fallback(ProviderKind::Forge, Some(ProviderKind::Ollama), false);
        assert!(config.fallback().is_none());
    }

    #[test]
    fn fallback_to_same_provider_yields_none() {
        let config = config_with_fallback(ProviderKind::Forge, Some(ProviderKind::Forge), true);
        assert!(config.fallback().is_none());
    }

    #[test]
    fn fallback_without_target_yields_none() {
        let config = config_with_fallback(ProviderKind::Forge, None, true);
        assert!(config.fallback().is_none());
    }

    #[test]
    fn self_fallback_fails_validation() {
        let config = config_with_fallback(ProviderKind::Forge, Some(ProviderKind::Forge), true);
        assert!(config.validate().is_err());
    }

    #[test]
    fn slider_temperature_is_scaled() {
        let config = ProviderConfig {
            temperature: Some(70.0),
            ..ProviderConfig::default()
        };
        let resolved = config.resolved_temperature().unwrap();
        assert!((resolved - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_temperature_passes_through() {
        let config = ProviderConfig {
            temperature: Some(0.3),
            ..ProviderConfig::default()
        };
        let resolved = config.resolved_temperature().unwrap();
        assert!((resolved - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn sentinel_model_is_unset() {
        let endpoint = EndpointConfig {
            model: Some("default".to_owned()),
            ..EndpointConfig::default()
        };
        assert!(endpoint.model_override().is_none());

        let endpoint = EndpointConfig {
            model: Some("llama3.2".to_owned()),
            ..EndpointConfig::default()
        };
        assert_eq!(endpoint.model_override(), Some("llama3.2"));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let config = ProviderConfig {
            temperature: Some(250.0),
            ..ProviderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
