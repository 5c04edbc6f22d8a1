//! Demultiplexer for OpenAI-style SSE streams
//!
//! Used by the forge gateway, `OpenAI` and the local supervisor.

use super::{LineDecoder, SSE_DATA_PREFIX};
use crate::protocol::openai::OpenAiStreamChunk;
use crate::types::{StreamEvent, Usage};

/// Decodes `data:` lines carrying `OpenAI` chat-completion chunks
#[derive(Debug, Default)]
pub struct OpenAiDecoder {
    /// Last usage reported by a chunk; attached to the terminal event.
    /// Each report overwrites the previous one, totals are not summed.
    usage: Option<Usage>,
}

impl OpenAiDecoder {
    /// Create a decoder with no recorded usage
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineDecoder for OpenAiDecoder {
    fn decode_line(&mut self, line: &str) -> Vec<StreamEvent> {
        let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) else {
            return Vec::new();
        };

        if payload.trim() == "[DONE]" {
            return vec![StreamEvent::Done(self.usage.take())];
        }

        let chunk: OpenAiStreamChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable SSE chunk");
                return Vec::new();
            }
        };

        if let Some(usage) = chunk.usage {
            self.usage = Some(Usage::from_counts(usage.prompt_tokens, usage.completion_tokens));
        }

        chunk
            .choices
            .first()
            .and_then(|c| c.delta.content.clone())
            .map(StreamEvent::Content)
            .into_iter()
            .collect()
    }
}
