use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use chatpage_core::models::generation::GenerationRequest;

use crate::error::ClientError;

/// Shown when the server fails without saying why.
pub const DEFAULT_ERROR: &str = "Something went wrong";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// The server boundary as seen by a chat session.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Returns the reply markup for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ClientError>;
}

/// [`ChatApi`] over HTTP: `POST {base_url}/api`.
pub struct HttpChatApi {
    http: Client,
    endpoint: String,
}

impl HttpChatApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/api", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_ERROR)
                .to_string();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        body.get("text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::MalformedResponse("missing `text` field".to_string()))
    }
}
