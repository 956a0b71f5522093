use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status. `message` is the
    /// provider's own error text when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request to provider failed: {0}")]
    Transport(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("client configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Message suitable for passing through to API callers.
    pub fn message(&self) -> String {
        match self {
            ProviderError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
