//! chatpage-core
//!
//! Pure domain types shared by the server and the chat session: messages,
//! the conversation log, model selection, the wire envelopes, and the
//! prompt/fence text helpers. No network dependency.

pub mod error;
pub mod fences;
pub mod models;
pub mod prompt;
