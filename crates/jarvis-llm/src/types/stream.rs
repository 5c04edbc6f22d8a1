use serde::{Deserialize, Serialize};

use super::response::Usage;

/// Event produced by a stream demultiplexer
///
/// Internal to the crate; the fallback controller folds these (plus any
/// stream error) into the terminal-guaranteed [`StreamChunk`] sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text content
    Content(String),
    /// Stream finished; carries usage when the wire format reported it
    Done(Option<Usage>),
}

/// Chunk delivered to a streaming caller's sink
///
/// `Done` or `Error` is always terminal and exactly one terminal chunk is
/// delivered per call, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamChunk {
    /// Incremental text content
    Content {
        /// Text fragment
        content: String,
    },
    /// Stream completed normally
    Done {
        /// Token usage, when the provider reported it
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },
    /// Stream failed; delivered instead of an exception
    Error {
        /// Error text including the provider and reason
        error: String,
    },
}

impl StreamChunk {
    /// Whether this chunk ends the stream
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}
