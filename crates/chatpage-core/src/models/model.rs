use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the fixed set of upstream model identifiers a session may select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelSelection {
    #[default]
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "o1")]
    O1,
}

impl ModelSelection {
    /// Every supported model, in display order.
    pub const ALL: [ModelSelection; 3] = [
        ModelSelection::Gpt4,
        ModelSelection::Gpt4oMini,
        ModelSelection::O1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSelection::Gpt4 => "gpt-4",
            ModelSelection::Gpt4oMini => "gpt-4o-mini",
            ModelSelection::O1 => "o1",
        }
    }

    /// Reasoning models take `max_completion_tokens` and reject a
    /// sampling temperature.
    pub fn is_reasoning(&self) -> bool {
        matches!(self, ModelSelection::O1)
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSelection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSelection::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownModel(s.to_string()))
    }
}
