//! Anthropic Messages API wire format

use serde::{Deserialize, Serialize};

// -- Request types --

/// Anthropic messages request
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate (required by the API)
    pub max_tokens: u32,
    /// System prompt, hoisted out of the message list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Conversation messages (user/assistant only)
    pub messages: Vec<AnthropicMessage>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Anthropic message
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    /// Role ("user" or "assistant")
    pub role: String,
    /// Text content
    pub content: String,
}

// -- Response types --

/// Anthropic messages response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    /// Response identifier
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
    /// Response content blocks
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
    /// Stop reason
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Content block in an Anthropic response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicContentBlock {
    /// Text content
    #[serde(default)]
    pub text: Option<String>,
}

/// Anthropic token usage
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AnthropicUsage {
    /// Input tokens
    #[serde(default)]
    pub input_tokens: u32,
    /// Output tokens
    #[serde(default)]
    pub output_tokens: u32,
}

// -- Streaming types --

/// Anthropic SSE event, one per `data:` line
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamEvent {
    /// Stream started; carries the prompt token count
    MessageStart {
        /// Partial message with initial usage
        message: AnthropicStreamMessage,
    },
    /// New content block started
    ContentBlockStart,
    /// Incremental content within a block
    ContentBlockDelta {
        /// Delta content
        delta: AnthropicStreamDelta,
    },
    /// Content block finished
    ContentBlockStop,
    /// Message metadata delta; carries the output token count
    MessageDelta {
        /// Updated usage
        #[serde(default)]
        usage: Option<AnthropicUsage>,
    },
    /// Stream completed
    MessageStop,
    /// Keep-alive
    Ping,
    /// Event types this gateway does not consume
    #[serde(other)]
    Other,
}

/// Partial message in a `message_start` event
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicStreamMessage {
    /// Initial usage (input tokens)
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

/// Delta content in a `content_block_delta` event
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicStreamDelta {
    /// Text fragment (present for `text_delta` deltas)
    #[serde(default)]
    pub text: Option<String>,
}
