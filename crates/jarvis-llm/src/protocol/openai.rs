//! `OpenAI` chat completion wire format
//!
//! Used by the forge gateway, the `OpenAI` API itself and the local
//! supervisor.

use serde::{Deserialize, Serialize};

use crate::types::{Choice, ChoiceMessage, Content};

// -- Request types --

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// `OpenAI` message within a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Message role ("system", "user", "assistant")
    pub role: String,
    /// Content (string or array of content parts)
    pub content: Content,
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponse {
    /// Response identifier
    pub id: String,
    /// Object type
    #[serde(default)]
    pub object: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created: Option<u64>,
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices
    pub choices: Vec<OpenAiChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

/// Choice within an `OpenAI` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoice {
    /// Choice index
    pub index: u32,
    /// Generated message
    pub message: OpenAiChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within an `OpenAI` response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoiceMessage {
    /// Role (always "assistant")
    pub role: String,
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
}

impl From<OpenAiChoice> for Choice {
    fn from(choice: OpenAiChoice) -> Self {
        Self {
            index: choice.index,
            message: ChoiceMessage {
                role: choice.message.role,
                content: choice.message.content.unwrap_or_default(),
            },
            finish_reason: choice.finish_reason,
        }
    }
}

/// Token usage in an `OpenAI` response
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpenAiUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

// -- Streaming types --

/// `OpenAI` streaming chunk, one per SSE `data:` line
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamChunk {
    /// Delta choices
    #[serde(default)]
    pub choices: Vec<OpenAiStreamChoice>,
    /// Usage, present on the final chunk for providers that report it
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamChoice {
    /// Incremental delta
    #[serde(default)]
    pub delta: OpenAiStreamDelta,
}

/// Delta content within a streaming choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiStreamDelta {
    /// Incremental text content
    #[serde(default)]
    pub content: Option<String>,
}
