//! Provider wire-format types
//!
//! One module per wire family. The forge gateway and the local supervisor
//! speak the OpenAI format, so three modules cover all five backends.

pub mod anthropic;
pub mod ollama;
pub mod openai;
