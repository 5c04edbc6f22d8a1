//! Ollama chat API wire format
//!
//! The local model server. Non-streaming responses are a single JSON
//! object; streaming responses are newline-delimited JSON.

use serde::{Deserialize, Serialize};

// -- Request types --

/// Ollama chat request
#[derive(Debug, Clone, Serialize)]
pub struct OllamaRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OllamaMessage>,
    /// Generation options
    pub options: OllamaOptions,
    /// Whether to stream; Ollama streams unless told otherwise
    pub stream: bool,
}

/// Ollama message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    /// Message role
    pub role: String,
    /// Text content
    pub content: String,
}

/// Ollama generation options
#[derive(Debug, Clone, Serialize)]
pub struct OllamaOptions {
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub num_predict: u32,
}

// -- Response types --

/// Ollama chat response (also the shape of each streamed line)
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaResponse {
    /// Generated message
    #[serde(default)]
    pub message: Option<OllamaResponseMessage>,
    /// Whether generation has finished (streaming only)
    #[serde(default)]
    pub done: bool,
    /// Prompt token count
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Completion token count
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Message within an Ollama response
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaResponseMessage {
    /// Text content
    #[serde(default)]
    pub content: String,
}
