use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chatpage_core::models::model::ModelSelection;
use chatpage_core::models::token_count::TokenCount;

use crate::error::ProviderError;

/// Upper bound on completion length for chat replies.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;

/// Sampling temperature for chat replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A single-prompt completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: ModelSelection,
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request with the default output bound and temperature.
    pub fn new(model: ModelSelection, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Raw completion text as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenCount>,
}

/// Opaque text-completion collaborator.
///
/// Implementations make exactly one attempt per call; failures are returned
/// to the caller and never retried here.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}
