use serde::{Deserialize, Serialize};

use super::model::ModelSelection;

/// Body of `POST /api` as sent by the chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: ModelSelection,
}

/// Response body of `POST /api`: either the cleaned completion or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Text { text: String },
    Error { error: String },
}

impl GenerationResult {
    pub fn text(text: impl Into<String>) -> Self {
        GenerationResult::Text { text: text.into() }
    }

    pub fn error(error: impl Into<String>) -> Self {
        GenerationResult::Error {
            error: error.into(),
        }
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            GenerationResult::Text { text } => Ok(text),
            GenerationResult::Error { error } => Err(error),
        }
    }
}
