use chatpage_core::models::message::ConversationLog;
use chatpage_core::models::model::ModelSelection;

/// Where the session is in its request/reveal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingReply,
    /// Revealing the bot message at `index`.
    Revealing { index: usize },
}

/// Everything the chat page shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub log: ConversationLog,
    pub model: ModelSelection,
    /// Contents of the input field.
    pub input: String,
    /// Inline error shown under the conversation, if any.
    pub error: Option<String>,
    pub phase: Phase,
}

impl SessionState {
    pub fn new(model: ModelSelection) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Busy while a request is in flight or a reply is being revealed. The
    /// send control is disabled for the whole time.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }
}
