//! Demultiplexer for Anthropic Messages API event streams
//!
//! Token counts arrive split across events: `message_start` reports input
//! tokens, `message_delta` reports output tokens, and `message_stop` ends
//! the stream. The decoder holds both counts until the terminal event.

use super::{LineDecoder, SSE_DATA_PREFIX};
use crate::protocol::anthropic::AnthropicStreamEvent;
use crate::types::{StreamEvent, Usage};

/// Decodes `data:` lines carrying Anthropic stream events
#[derive(Debug, Default)]
pub struct AnthropicDecoder {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl AnthropicDecoder {
    /// Create a decoder with zeroed counts
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineDecoder for AnthropicDecoder {
    fn decode_line(&mut self, line: &str) -> Vec<StreamEvent> {
        let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) else {
            return Vec::new();
        };

        let event: AnthropicStreamEvent = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable Anthropic SSE event");
                return Vec::new();
            }
        };

        match event {
            AnthropicStreamEvent::MessageStart { message } => {
                if let Some(usage) = message.usage {
                    self.prompt_tokens = usage.input_tokens;
                }
                Vec::new()
            }
            AnthropicStreamEvent::ContentBlockDelta { delta } => {
                delta.text.map(StreamEvent::Content).into_iter().collect()
            }
            AnthropicStreamEvent::MessageDelta { usage } => {
                if let Some(usage) = usage {
                    self.completion_tokens = usage.output_tokens;
                }
                Vec::new()
            }
            AnthropicStreamEvent::MessageStop => {
                vec![StreamEvent::Done(Some(Usage::from_counts(
                    self.prompt_tokens,
                    self.completion_tokens,
                )))]
            }
            AnthropicStreamEvent::ContentBlockStart
            | AnthropicStreamEvent::ContentBlockStop
            | AnthropicStreamEvent::Ping
            | AnthropicStreamEvent::Other => Vec::new(),
        }
    }
}
