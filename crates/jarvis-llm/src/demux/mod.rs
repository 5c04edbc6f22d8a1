//! Streaming response demultiplexers
//!
//! Each provider wire format gets a [`LineDecoder`] that turns framed lines
//! into canonical [`StreamEvent`]s; [`decode_body`] drives a decoder over an
//! HTTP byte stream. Malformed lines are skipped (logged at debug), and no
//! events are produced after the terminal `Done`.

mod anthropic;
mod ollama;
mod openai;

pub use anthropic::AnthropicDecoder;
pub use ollama::OllamaDecoder;
pub use openai::OpenAiDecoder;

use bytes::Bytes;
use futures_util::{Stream, StreamExt, stream};

use crate::error::LlmError;
use crate::framing::LineFramer;
use crate::types::StreamEvent;

/// Turns one framed line into zero or more canonical stream events
pub trait LineDecoder: Send {
    /// Decode a single complete line
    ///
    /// Emitting [`StreamEvent::Done`] ends the stream; the driver will not
    /// call the decoder again afterwards.
    fn decode_line(&mut self, line: &str) -> Vec<StreamEvent>;
}

/// SSE `data:` line prefix shared by the OpenAI and Anthropic framings
pub(crate) const SSE_DATA_PREFIX: &str = "data: ";

/// Drive a [`LineDecoder`] over a response byte stream
///
/// Reads incrementally (never buffers the whole body), assembles lines with
/// a [`LineFramer`], and fuses the output after the first terminal event. A
/// transport error while reading becomes the final item.
pub fn decode_body<S, E, D>(body: S, decoder: D) -> impl Stream<Item = Result<StreamEvent, LlmError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display,
    D: LineDecoder + 'static,
{
    let mut framer = LineFramer::new();
    let mut decoder = decoder;
    let mut finished = false;

    body.map(move |read| -> Vec<Result<StreamEvent, LlmError>> {
        if finished {
            return Vec::new();
        }
        match read {
            Ok(chunk) => {
                let mut out = Vec::new();
                'lines: for line in framer.push(&chunk) {
                    for event in decoder.decode_line(&line) {
                        let terminal = matches!(event, StreamEvent::Done(_));
                        out.push(Ok(event));
                        if terminal {
                            finished = true;
                            break 'lines;
                        }
                    }
                }
                out
            }
            Err(e) => {
                finished = true;
                vec![Err(LlmError::Streaming(e.to_string()))]
            }
        }
    })
    .flat_map(stream::iter)
}
