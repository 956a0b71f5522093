use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("no message at index {0}")]
    NoSuchMessage(usize),
}
