//! chatpage-session
//!
//! Client side of the chat page: the session state and its reducer, the
//! markup sanitizer, the typewriter reveal, the HTTP client for `POST /api`,
//! and the event loop tying them together.
//!
//! All state changes go through [`update::update`]. The runtime feeds it
//! messages from the UI, from the in-flight request, and from the reveal
//! driver, and executes the [`update::Effect`]s it returns.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod reveal;
pub mod runtime;
pub mod state;
pub mod update;
pub mod view;
