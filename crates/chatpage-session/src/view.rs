//! Incremental terminal rendering of session snapshots.
//!
//! Snapshots arrive whenever the state changes, possibly coalesced. The view
//! remembers how much of the conversation it has already written and emits
//! only the new part, so a reveal shows up character by character.

use chatpage_core::models::message::Sender;

use crate::state::SessionState;

#[derive(Debug, Default)]
pub struct TerminalView {
    /// Index of the message currently being written.
    current: usize,
    /// Whether the prefix of `current` has been written.
    started: bool,
    /// Characters of `current` already written.
    written: usize,
    last_error: Option<String>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to append to the terminal to bring it up to date with `state`.
    pub fn render(&mut self, state: &SessionState) -> String {
        let mut out = String::new();
        let count = state.log.len();

        while self.current < count {
            let Some(message) = state.log.get(self.current) else {
                break;
            };

            if !self.started {
                out.push_str(match message.sender {
                    Sender::User => "\nyou> ",
                    Sender::Bot => "\nbot> ",
                });
                self.started = true;
                self.written = 0;
            }

            let new_chars: String = message.text.chars().skip(self.written).collect();
            self.written += new_chars.chars().count();
            out.push_str(&new_chars);

            if self.current + 1 < count {
                self.current += 1;
                self.started = false;
            } else {
                break;
            }
        }

        if state.error != self.last_error {
            if let Some(error) = &state.error {
                out.push_str("\n[error] ");
                out.push_str(error);
            }
            self.last_error = state.error.clone();
        }

        out
    }
}
