use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use chatpage_core::fences::strip_code_fences;
use chatpage_core::models::generation::GenerationResult;
use chatpage_core::models::model::ModelSelection;
use chatpage_core::prompt;
use chatpage_openai::generator::CompletionRequest;

use crate::error::{ApiError, API_KEY_MISSING, INVALID_MODEL, INVALID_PROMPT};
use crate::state::AppState;

/// Generate a chat reply for `{prompt, model}`.
///
/// Checks run in a fixed order and the first failure wins: credential,
/// JSON body, prompt, model. The body is taken as raw bytes so a missing
/// credential is reported even when the body is also malformed.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, ApiError> {
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| ApiError::Configuration(API_KEY_MISSING.to_string()))?;

    let payload: Value = serde_json::from_slice(&body)?;

    let user_prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest(INVALID_PROMPT.to_string()))?;

    let model = payload
        .get("model")
        .and_then(Value::as_str)
        .and_then(|m| m.parse::<ModelSelection>().ok())
        .ok_or_else(|| ApiError::BadRequest(INVALID_MODEL.to_string()))?;

    let request = CompletionRequest::new(model, prompt::combine(user_prompt));
    let completion = generator.generate(&request).await?;

    let text = strip_code_fences(&completion.text);
    tracing::debug!(%model, raw_len = completion.text.len(), cleaned_len = text.len(), "reply cleaned");

    Ok(Json(GenerationResult::text(text)))
}
