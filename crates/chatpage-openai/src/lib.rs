//! chatpage-openai
//!
//! The upstream text-generation collaborator: a small trait the server
//! depends on, and its OpenAI chat-completions implementation.

pub mod client;
pub mod error;
pub mod generator;
pub mod tokens;
