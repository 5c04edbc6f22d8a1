//! Conversion between canonical types and the Ollama wire format

use jarvis_config::ProviderKind;

use super::{epoch_secs, role_str, synthesize_id};
use crate::protocol::ollama::{OllamaMessage, OllamaOptions, OllamaRequest, OllamaResponse};
use crate::types::{Choice, ChoiceMessage, CompletionRequest, CompletionResponse, Usage};

impl From<&CompletionRequest> for OllamaRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: req
                .messages
                .iter()
                .map(|m| OllamaMessage {
                    role: role_str(m.role).to_owned(),
                    content: m.content.as_text(),
                })
                .collect(),
            options: OllamaOptions {
                temperature: req.temperature,
                num_predict: req.max_tokens,
            },
            stream: req.stream,
        }
    }
}

/// Normalize an Ollama response into the canonical completion
///
/// Ollama supplies neither an id nor a timestamp, so both are synthesized.
pub fn normalize(resp: OllamaResponse, model: &str) -> CompletionResponse {
    let content = resp.message.map(|m| m.content).unwrap_or_default();

    CompletionResponse {
        id: synthesize_id(ProviderKind::Ollama),
        object: "chat.completion".to_owned(),
        created: epoch_secs(),
        model: model.to_owned(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage::assistant(content),
            finish_reason: Some("stop".to_owned()),
        }],
        usage: Some(Usage::from_counts(
            resp.prompt_eval_count.unwrap_or(0),
            resp.eval_count.unwrap_or(0),
        )),
    }
}
