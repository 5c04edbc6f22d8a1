#![allow(clippy::must_use_candidate)]

//! Configuration for the Jarvis LLM gateway
//!
//! Loaded from a TOML file with `{{ env.VAR }}` placeholder expansion, so
//! secrets stay out of the config file itself.

mod env;
pub mod llm;
mod loader;
pub mod server;

use serde::Deserialize;

pub use llm::{DEFAULT_MODEL_SENTINEL, EndpointConfig, ProviderConfig, ProviderKind};
pub use server::ServerConfig;

/// Top-level Jarvis configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// LLM provider configuration
    #[serde(default)]
    pub llm: ProviderConfig,
}
