use serde::Deserialize;

use chatpage_core::models::token_count::TokenCount;

/// `usage` object of a chat-completions response.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

/// Extract token counts from a chat-completions usage block.
pub fn extract_token_usage(usage: &Usage) -> TokenCount {
    TokenCount {
        input: usage.prompt_tokens,
        output: usage.completion_tokens,
    }
}
