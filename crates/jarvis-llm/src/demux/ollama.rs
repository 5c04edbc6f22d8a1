//! Demultiplexer for Ollama's newline-delimited JSON streams

use super::LineDecoder;
use crate::protocol::ollama::OllamaResponse;
use crate::types::{StreamEvent, Usage};

/// Decodes NDJSON lines from the local model server
///
/// Stateless: the final object carries its own eval counts.
#[derive(Debug, Default)]
pub struct OllamaDecoder;

impl LineDecoder for OllamaDecoder {
    fn decode_line(&mut self, line: &str) -> Vec<StreamEvent> {
        if line.trim().is_empty() {
            return Vec::new();
        }

        let chunk: OllamaResponse = match serde_json::from_str(line) {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable NDJSON line");
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        if let Some(message) = chunk.message
            && !message.content.is_empty()
        {
            events.push(StreamEvent::Content(message.content));
        }
        if chunk.done {
            events.push(StreamEvent::Done(Some(Usage::from_counts(
                chunk.prompt_eval_count.unwrap_or(0),
                chunk.eval_count.unwrap_or(0),
            ))));
        }
        events
    }
}
