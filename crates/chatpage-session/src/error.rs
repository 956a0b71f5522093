use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx from `/api`. Displays as the server's message alone, since
    /// that is what the user sees.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("client configuration error: {0}")]
    Config(String),

    #[error("session is closed")]
    SessionClosed,
}
