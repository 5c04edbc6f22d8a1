//! Multi-provider LLM request and streaming core for Jarvis
//!
//! Provides a unified chat interface over five backends (the hosted forge
//! gateway, a local Ollama server, `OpenAI`, Anthropic, and a local
//! supervisor speaking the `OpenAI` wire format), normalizing every
//! response and stream to one canonical shape, with a single-hop fallback
//! when the primary provider fails.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod client;
pub mod convert;
pub mod demux;
pub mod error;
pub mod framing;
pub mod protocol;
pub mod provider;
#[cfg(feature = "http")]
pub mod server;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use framing::LineFramer;
pub use provider::{ProviderAdapter, build_adapter};
#[cfg(feature = "http")]
pub use server::{HttpState, chat_router};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StreamChunk};
