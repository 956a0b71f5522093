//! OpenAI chat-completions client.
//!
//! The combined prompt is sent as a single `user` message. Reasoning models
//! (`o1`) differ from the others in two request fields:
//!
//! - the output bound is `max_completion_tokens` instead of `max_tokens`
//! - `temperature` must be omitted, the API rejects any value but the default
//!
//! Error bodies have the shape `{"error": {"message": "...", ...}}`; the
//! message is surfaced verbatim so callers see why the provider refused.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use chatpage_core::models::model::ModelSelection;

use crate::error::ProviderError;
use crate::generator::{Completion, CompletionRequest, TextGenerator};
use crate::tokens::{extract_token_usage, Usage};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`OpenAiClient`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: ModelSelection,
    messages: [WireMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn build_body(request: &CompletionRequest) -> ChatCompletionBody<'_> {
    let reasoning = request.model.is_reasoning();
    ChatCompletionBody {
        model: request.model,
        messages: [WireMessage {
            role: "user",
            content: &request.prompt,
        }],
        max_tokens: (!reasoning).then_some(request.max_output_tokens),
        max_completion_tokens: reasoning.then_some(request.max_output_tokens),
        temperature: (!reasoning).then_some(request.temperature),
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let body = build_body(request);

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| format!("upstream returned HTTP {}", status.as_u16()));
            warn!(model = %request.model, status = status.as_u16(), %message, "completion rejected");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::ResponseParse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ResponseParse("no choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        let usage = parsed.usage.as_ref().map(extract_token_usage);

        info!(
            model = %request.model,
            text_len = text.len(),
            input_tokens = usage.map(|u| u.input),
            output_tokens = usage.map(|u| u.output),
            "completion received"
        );

        Ok(Completion { text, usage })
    }
}
