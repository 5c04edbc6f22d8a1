//! Mock provider backends for integration tests
//!
//! One server per wire family, returning canned responses: an
//! OpenAI-compatible server (used for forge, `OpenAI` and supervisor
//! configs), an Ollama-style server speaking newline-delimited JSON, and
//! an Anthropic-style server speaking typed SSE events.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Wire families a mock can speak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    /// `POST /v1/chat/completions`, JSON or SSE chunks
    OpenAi,
    /// `POST /api/chat`, JSON or newline-delimited JSON
    Ollama,
    /// `POST /v1/messages`, JSON or typed SSE events
    Anthropic,
}

/// Mock provider backend returning predictable responses
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    wire: Wire,
    request_count: AtomicU32,
    /// Number of requests to fail with 500 before succeeding
    fail_count: AtomicU32,
    /// Custom response content (if set)
    response_content: Option<String>,
}

impl MockProvider {
    /// Start a mock server, returning immediately
    pub async fn start(wire: Wire) -> anyhow::Result<Self> {
        Self::start_inner(wire, 0, None).await
    }

    /// Start a mock server that fails the first `n` requests with 500
    pub async fn start_failing(wire: Wire, n: u32) -> anyhow::Result<Self> {
        Self::start_inner(wire, n, None).await
    }

    /// Start a mock server with custom response content
    pub async fn start_with_response(wire: Wire, content: &str) -> anyhow::Result<Self> {
        Self::start_inner(wire, 0, Some(content.to_owned())).await
    }

    async fn start_inner(wire: Wire, fail_count: u32, response_content: Option<String>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            wire,
            request_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            response_content,
        });

        let path = match wire {
            Wire::OpenAi => "/v1/chat/completions",
            Wire::Ollama => "/api/chat",
            Wire::Anthropic => "/v1/messages",
        };
        let app = Router::new()
            .route(path, routing::post(handle_chat))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a provider endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of chat requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

const DEFAULT_CONTENT: &str = "Hello from mock provider";

async fn handle_chat(State(state): State<Arc<MockState>>, Json(req): Json<serde_json::Value>) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": {"message": "mock server intentional failure", "type": "server_error"}
            })),
        )
            .into_response();
    }

    let content = state.response_content.as_deref().unwrap_or(DEFAULT_CONTENT);
    let model = req["model"].as_str().unwrap_or("mock-model").to_owned();
    let is_stream = req["stream"].as_bool().unwrap_or(false);

    match (state.wire, is_stream) {
        (Wire::OpenAi, false) => openai_response(&model, content).into_response(),
        (Wire::OpenAi, true) => openai_stream(&model, content).into_response(),
        (Wire::Ollama, false) => ollama_response(&model, content).into_response(),
        (Wire::Ollama, true) => ollama_stream(&model, content).into_response(),
        (Wire::Anthropic, false) => anthropic_response(&model, content).into_response(),
        (Wire::Anthropic, true) => anthropic_stream(content).into_response(),
    }
}

// -- OpenAI wire --

fn openai_response(model: &str, content: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000u64,
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
}

fn openai_stream(model: &str, content: &str) -> impl IntoResponse {
    let mut body = String::new();
    let chunk = |choices: serde_json::Value, usage: serde_json::Value| {
        serde_json::json!({
            "id": "chatcmpl-test-stream",
            "object": "chat.completion.chunk",
            "created": 1_700_000_000u64,
            "model": model,
            "choices": choices,
            "usage": usage,
        })
    };

    for word in content.split_inclusive(' ') {
        let data = chunk(
            serde_json::json!([{"index": 0, "delta": {"content": word}, "finish_reason": null}]),
            serde_json::Value::Null,
        );
        body.push_str(&format!("data: {data}\n\n"));
    }
    let data = chunk(
        serde_json::json!([{"index": 0, "delta": {}, "finish_reason": "stop"}]),
        serde_json::json!({"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}),
    );
    body.push_str(&format!("data: {data}\n\n"));
    body.push_str("data: [DONE]\n\n");

    sse_body(body)
}

// -- Ollama wire --

fn ollama_response(model: &str, content: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "model": model,
        "message": {"role": "assistant", "content": content},
        "done": true,
        "prompt_eval_count": 10,
        "eval_count": 5
    }))
}

fn ollama_stream(model: &str, content: &str) -> impl IntoResponse {
    let mut body = String::new();
    for word in content.split_inclusive(' ') {
        let line = serde_json::json!({
            "model": model,
            "message": {"role": "assistant", "content": word},
            "done": false
        });
        body.push_str(&format!("{line}\n"));
    }
    let line = serde_json::json!({
        "model": model,
        "message": {"role": "assistant", "content": ""},
        "done": true,
        "prompt_eval_count": 10,
        "eval_count": 5
    });
    body.push_str(&format!("{line}\n"));

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/x-ndjson")],
        body,
    )
}

// -- Anthropic wire --

fn anthropic_response(model: &str, content: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": "msg_test_123",
        "type": "message",
        "model": model,
        "content": [{"type": "text", "text": content}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    }))
}

fn anthropic_stream(content: &str) -> impl IntoResponse {
    let mut body = String::new();
    let mut event = |name: &str, data: serde_json::Value| {
        body.push_str(&format!("event: {name}\ndata: {data}\n\n"));
    };

    event(
        "message_start",
        serde_json::json!({"type": "message_start", "message": {"usage": {"input_tokens": 10, "output_tokens": 0}}}),
    );
    event(
        "content_block_start",
        serde_json::json!({"type": "content_block_start", "index": 0}),
    );
    for word in content.split_inclusive(' ') {
        event(
            "content_block_delta",
            serde_json::json!({
                "type": "content_block_delta",
                "index": 0,
                "delta": {"type": "text_delta", "text": word}
            }),
        );
    }
    event(
        "content_block_stop",
        serde_json::json!({"type": "content_block_stop", "index": 0}),
    );
    event(
        "message_delta",
        serde_json::json!({"type": "message_delta", "usage": {"input_tokens": 0, "output_tokens": 5}}),
    );
    event("message_stop", serde_json::json!({"type": "message_stop"}));

    sse_body(body)
}

fn sse_body(body: String) -> (StatusCode, [(axum::http::HeaderName, &'static str); 1], String) {
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
        body,
    )
}
