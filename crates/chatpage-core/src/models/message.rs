use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Who authored a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A single entry in the conversation log.
///
/// Bot messages start empty and grow one character at a time while the
/// reply is revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: jiff::Timestamp,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: jiff::Timestamp::now(),
        }
    }

    pub fn bot_placeholder() -> Self {
        Self {
            sender: Sender::Bot,
            text: String::new(),
            timestamp: jiff::Timestamp::now(),
        }
    }
}

/// Ordered, append-only record of a page session's messages.
///
/// Entries are never removed or reordered. The only in-place mutation is
/// [`ConversationLog::append_char`], which touches exactly one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn append_char(&mut self, index: usize, ch: char) -> Result<(), CoreError> {
        let message = self
            .messages
            .get_mut(index)
            .ok_or(CoreError::NoSuchMessage(index))?;
        message.text.push(ch);
        Ok(())
    }
}
