//! Axum route handler exposing the client over an OpenAI-compatible endpoint

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures_util::{Stream, StreamExt};
use jarvis_config::ProviderConfig;

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::protocol::openai::OpenAiRequest;
use crate::provider;
use crate::types::{InvokeOptions, Message, StreamChunk};

/// Shared state for the chat route
#[derive(Clone)]
pub struct HttpState {
    /// Shared client and connection pool
    pub client: LlmClient,
    /// Active provider configuration
    pub config: Arc<ProviderConfig>,
}

/// Build the chat router
pub fn chat_router(state: HttpState) -> Router {
    Router::new()
        .route("/v1/chat/completions", routing::post(chat_completions))
        .with_state(state)
}

/// Handle `POST /v1/chat/completions`
async fn chat_completions(State(state): State<HttpState>, Json(wire): Json<OpenAiRequest>) -> Response {
    let mut config = state.config.as_ref().clone();
    let is_stream = wire.stream.unwrap_or(false) && config.stream_enabled;
    let active = config.provider;
    if !wire.model.is_empty() && wire.model != jarvis_config::DEFAULT_MODEL_SENTINEL {
        config.endpoint_mut(active).model = Some(wire.model);
    }

    let options = InvokeOptions {
        temperature: wire.temperature,
        max_tokens: wire.max_tokens,
    };
    let messages: Vec<Message> = wire.messages.into_iter().map(Message::from).collect();

    if is_stream {
        stream_response(state.client, config, messages, options).into_response()
    } else {
        match state.client.invoke(&config, &messages, options).await {
            Ok(response) => Json(response).into_response(),
            Err(e) => error_response(&e),
        }
    }
}

/// Build a streaming SSE response in `OpenAI` chunk format
fn stream_response(
    client: LlmClient,
    config: ProviderConfig,
    messages: Vec<Message>,
    options: InvokeOptions,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let response_id = format!("chatcmpl-{now}");
    let model = config
        .endpoint(config.provider)
        .model_override()
        .unwrap_or_else(|| provider::default_model(config.provider))
        .to_owned();

    let (sender, receiver) = tokio::sync::mpsc::unbounded_channel::<StreamChunk>();
    tokio::spawn(async move {
        client
            .stream(&config, &messages, options, |chunk| {
                // Receiver dropped means the SSE client went away
                let _ = sender.send(chunk);
            })
            .await;
    });

    let event_stream = futures_util::stream::unfold(receiver, |mut receiver| async move {
        receiver.recv().await.map(|chunk| (chunk, receiver))
    })
        .map(move |chunk| match chunk {
            StreamChunk::Content { content } => {
                let data = serde_json::json!({
                    "id": response_id,
                    "object": "chat.completion.chunk",
                    "created": now,
                    "model": model,
                    "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}],
                });
                vec![Ok(Event::default().data(data.to_string()))]
            }
            StreamChunk::Done { usage } => {
                let data = serde_json::json!({
                    "id": response_id,
                    "object": "chat.completion.chunk",
                    "created": now,
                    "model": model,
                    "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}],
                    "usage": usage,
                });
                vec![
                    Ok(Event::default().data(data.to_string())),
                    Ok(Event::default().data("[DONE]")),
                ]
            }
            StreamChunk::Error { error } => {
                let data = serde_json::json!({
                    "error": {"message": error, "type": "streaming_error"}
                });
                vec![Ok(Event::default().data(data.to_string()))]
            }
        })
        .flat_map(futures_util::stream::iter);

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

/// Convert an LLM error to an `OpenAI`-style JSON error response
fn error_response(error: &LlmError) -> Response {
    let (status, error_type) = match error {
        LlmError::MissingApiKey { .. } => (StatusCode::UNAUTHORIZED, "authentication_error"),
        LlmError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
        LlmError::Transport { .. } => (StatusCode::BAD_GATEWAY, "transport_error"),
        LlmError::InvalidResponse { .. } | LlmError::Streaming(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "provider_error")
        }
    };

    let body = serde_json::json!({
        "error": {
            "message": error.to_string(),
            "type": error_type,
        }
    });

    (status, Json(body)).into_response()
}
