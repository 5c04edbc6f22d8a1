//! Conversion between canonical types and provider wire formats

pub mod anthropic;
pub mod ollama;
pub mod openai;

use std::time::{SystemTime, UNIX_EPOCH};

use jarvis_config::ProviderKind;

use crate::types::Role;

/// Current Unix time in seconds
pub(crate) fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Synthesize a response id for providers that do not supply one
pub(crate) fn synthesize_id(provider: ProviderKind) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{provider}-{millis}")
}

/// Wire-format role string for a message role
pub(crate) const fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}
