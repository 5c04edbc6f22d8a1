use super::message::Message;

/// Per-call overrides a caller may pass alongside the provider config
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeOptions {
    /// Sampling temperature override
    pub temperature: Option<f64>,
    /// Max tokens override
    pub max_tokens: Option<u32>,
}

/// Fully resolved completion request handed to a provider adapter
///
/// Model, temperature and max tokens have already had config and
/// per-provider defaults applied; adapters translate this 1:1 into their
/// wire format.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Ordered conversation transcript
    pub messages: Vec<Message>,
    /// Sampling temperature (0..=1)
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Whether the response will be streamed
    pub stream: bool,
}
