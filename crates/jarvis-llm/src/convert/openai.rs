//! Conversion between canonical types and the `OpenAI` wire format
//!
//! OpenAI-shaped responses are already canonical in structure, so
//! normalization is mostly a pass-through that fills in missing metadata.

use jarvis_config::ProviderKind;

use super::{epoch_secs, role_str, synthesize_id};
use crate::protocol::openai::{OpenAiMessage, OpenAiRequest, OpenAiResponse};
use crate::types::{CompletionRequest, CompletionResponse, Message, Role, Usage};

impl From<&CompletionRequest> for OpenAiRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: req
                .messages
                .iter()
                .map(|m| OpenAiMessage {
                    role: role_str(m.role).to_owned(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: Some(req.temperature),
            max_tokens: Some(req.max_tokens),
            stream: req.stream.then_some(true),
        }
    }
}

impl From<OpenAiMessage> for Message {
    fn from(msg: OpenAiMessage) -> Self {
        let role = match msg.role.as_str() {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            _ => Role::User,
        };
        Self {
            role,
            content: msg.content,
        }
    }
}

/// Normalize an OpenAI-shaped response into the canonical completion
pub fn normalize(provider: ProviderKind, resp: OpenAiResponse) -> CompletionResponse {
    CompletionResponse {
        id: if resp.id.is_empty() {
            synthesize_id(provider)
        } else {
            resp.id
        },
        object: resp.object.unwrap_or_else(|| "chat.completion".to_owned()),
        created: resp.created.unwrap_or_else(epoch_secs),
        model: resp.model.unwrap_or_default(),
        choices: resp.choices.into_iter().map(Into::into).collect(),
        usage: resp
            .usage
            .map(|u| Usage::from_counts(u.prompt_tokens, u.completion_tokens)),
    }
}
