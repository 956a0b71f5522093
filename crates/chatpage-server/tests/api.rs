//! Drives the router in-process with fake generators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use chatpage_core::models::model::ModelSelection;
use chatpage_core::prompt::SYSTEM_INSTRUCTION;
use chatpage_openai::error::ProviderError;
use chatpage_openai::generator::{Completion, CompletionRequest, TextGenerator};
use chatpage_server::router;
use chatpage_server::state::AppState;

struct FakeGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last: Mutex<Option<CompletionRequest>>,
}

impl FakeGenerator {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Ok(text) => Ok(Completion {
                text: text.clone(),
                usage: None,
            }),
            Err(message) => Err(ProviderError::Api {
                status: 429,
                message: message.clone(),
            }),
        }
    }
}

fn state_with(generator: &Arc<FakeGenerator>) -> AppState {
    let generator: Arc<dyn TextGenerator> = generator.clone();
    AppState::new(Some(generator))
}

async fn post_api(state: AppState, body: &str) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_request_returns_text() {
    let generator = FakeGenerator::replying("<p>Hi there!</p>");
    let (status, body) = post_api(
        state_with(&generator),
        r#"{"prompt":"Hello","model":"gpt-4"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"text": "<p>Hi there!</p>"}));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn upstream_call_uses_combined_prompt_and_bounds() {
    let generator = FakeGenerator::replying("<p>ok</p>");
    post_api(
        state_with(&generator),
        r#"{"prompt":"Tell me a joke","model":"gpt-4o-mini"}"#,
    )
    .await;

    let request = generator.last.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, ModelSelection::Gpt4oMini);
    assert!(request.prompt.starts_with(SYSTEM_INSTRUCTION));
    assert!(request.prompt.ends_with("User: Tell me a joke\nChatbot:"));
    assert_eq!(request.max_output_tokens, 500);
    assert!((request.temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn fenced_reply_is_cleaned() {
    let generator = FakeGenerator::replying("\n```html\n<p>Hi there!</p>\n```\n");
    let (status, body) = post_api(
        state_with(&generator),
        r#"{"prompt":"Hello","model":"o1"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "<p>Hi there!</p>");
}

#[tokio::test]
async fn invalid_prompts_are_rejected_before_upstream() {
    let generator = FakeGenerator::replying("unused");
    let bodies = [
        r#"{"model":"gpt-4"}"#,
        r#"{"prompt":"","model":"gpt-4"}"#,
        r#"{"prompt":42,"model":"gpt-4"}"#,
        r#"{"prompt":null,"model":"gpt-4"}"#,
        r#"{"prompt":["Hello"],"model":"gpt-4"}"#,
        r#"[]"#,
        "null",
    ];

    for body in bodies {
        let (status, json) = post_api(state_with(&generator), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json, json!({"error": "Invalid prompt"}), "body: {body}");
    }
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn models_outside_allow_list_are_rejected_before_upstream() {
    let generator = FakeGenerator::replying("unused");
    let bodies = [
        r#"{"prompt":"Hello"}"#,
        r#"{"prompt":"Hello","model":""}"#,
        r#"{"prompt":"Hello","model":"gpt-3.5-turbo"}"#,
        r#"{"prompt":"Hello","model":"GPT-4"}"#,
        r#"{"prompt":"Hello","model":4}"#,
    ];

    for body in bodies {
        let (status, json) = post_api(state_with(&generator), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            json,
            json!({"error": "Invalid or missing model selection"}),
            "body: {body}"
        );
    }
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn prompt_is_checked_before_model() {
    let generator = FakeGenerator::replying("unused");
    let (status, json) = post_api(state_with(&generator), r#"{"model":"nope"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid prompt");
}

#[tokio::test]
async fn missing_credential_is_a_server_error() {
    let (status, json) = post_api(
        AppState::new(None),
        r#"{"prompt":"Hello","model":"gpt-4"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "API key missing"}));
}

#[tokio::test]
async fn missing_credential_wins_over_bad_input() {
    let (status, json) = post_api(AppState::new(None), "not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "API key missing");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let generator = FakeGenerator::replying("unused");
    let (status, json) = post_api(state_with(&generator), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_passes_message_through() {
    let generator = FakeGenerator::failing("Rate limit reached");
    let (status, json) = post_api(
        state_with(&generator),
        r#"{"prompt":"Hello","model":"gpt-4"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Rate limit reached"}));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn upstream_failure_without_message_uses_default() {
    let generator = FakeGenerator::failing("");
    let (status, json) = post_api(
        state_with(&generator),
        r#"{"prompt":"Hello","model":"gpt-4"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal Server Error");
}

#[tokio::test]
async fn health_check_is_ok() {
    let response = router(AppState::new(None))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({"status": "ok"}));
}
