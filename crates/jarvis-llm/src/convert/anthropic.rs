//! Conversion between canonical types and the Anthropic wire format

use jarvis_config::ProviderKind;

use super::{epoch_secs, synthesize_id};
use crate::protocol::anthropic::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::types::{Choice, ChoiceMessage, CompletionRequest, CompletionResponse, Role, Usage};

impl From<&CompletionRequest> for AnthropicRequest {
    fn from(req: &CompletionRequest) -> Self {
        let mut system = None;
        let mut messages = Vec::new();

        // The system prompt is a top-level field, not a message
        for msg in &req.messages {
            match msg.role {
                Role::System => system = Some(msg.content.as_text()),
                Role::User | Role::Assistant => messages.push(AnthropicMessage {
                    role: match msg.role {
                        Role::Assistant => "assistant".to_owned(),
                        _ => "user".to_owned(),
                    },
                    content: msg.content.as_text(),
                }),
            }
        }

        Self {
            model: req.model.clone(),
            max_tokens: req.max_tokens,
            system,
            messages,
            temperature: Some(req.temperature),
            stream: req.stream.then_some(true),
        }
    }
}

/// Normalize an Anthropic response into the canonical completion
pub fn normalize(resp: AnthropicResponse) -> CompletionResponse {
    let content = resp
        .content
        .first()
        .and_then(|block| block.text.clone())
        .unwrap_or_default();

    let id = if resp.id.is_empty() {
        synthesize_id(ProviderKind::Anthropic)
    } else {
        resp.id
    };

    CompletionResponse {
        id,
        object: "chat.completion".to_owned(),
        created: epoch_secs(),
        model: resp.model.unwrap_or_default(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage::assistant(content),
            finish_reason: resp.stop_reason,
        }],
        usage: resp.usage.map(|u| Usage::from_counts(u.input_tokens, u.output_tokens)),
    }
}
