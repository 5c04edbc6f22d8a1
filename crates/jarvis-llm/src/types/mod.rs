//! Canonical request/response types
//!
//! These are provider-agnostic; every wire format converts to and from
//! these shapes, and they are the only shapes callers of this crate see.

pub mod message;
pub mod request;
pub mod response;
pub mod stream;

pub use message::{Content, ContentPart, Message, Role};
pub use request::{CompletionRequest, InvokeOptions};
pub use response::{Choice, ChoiceMessage, CompletionResponse, Usage};
pub use stream::{StreamChunk, StreamEvent};
