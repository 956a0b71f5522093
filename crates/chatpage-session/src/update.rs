//! The session reducer.
//!
//! `update` is the only code that mutates [`SessionState`]. It never does
//! I/O; anything that has to happen outside the state is returned as an
//! [`Effect`] for the runtime to carry out.

use chatpage_core::models::generation::GenerationRequest;
use chatpage_core::models::message::Message;
use chatpage_core::models::model::ModelSelection;

use crate::render;
use crate::reveal::{RevealEvent, RevealStep};
use crate::state::{Phase, SessionState};

pub const EMPTY_PROMPT_ERROR: &str = "Please enter a message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    InputChanged(String),
    ModelSelected(ModelSelection),
    Submit,
    /// Outcome of the request issued by the last `Submit`: the reply markup
    /// or a user-visible error.
    ReplyReceived(Result<String, String>),
    RevealStep(RevealStep),
    RevealFinished { index: usize },
}

impl From<RevealEvent> for Msg {
    fn from(event: RevealEvent) -> Self {
        match event {
            RevealEvent::Step(step) => Msg::RevealStep(step),
            RevealEvent::Finished { index } => Msg::RevealFinished { index },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send this request to `/api`.
    Dispatch(GenerationRequest),
    /// Reveal `text` into the message at `index`.
    StartReveal { index: usize, text: String },
}

pub fn update(state: &mut SessionState, msg: Msg) -> Option<Effect> {
    match msg {
        Msg::InputChanged(input) => {
            state.input = input;
            None
        }
        Msg::ModelSelected(model) => {
            state.model = model;
            None
        }
        Msg::Submit => submit(state),
        Msg::ReplyReceived(result) => reply_received(state, result),
        Msg::RevealStep(step) => {
            if state.phase != (Phase::Revealing { index: step.index }) {
                tracing::debug!(index = step.index, "dropping stale reveal step");
                return None;
            }
            if let Err(e) = state.log.append_char(step.index, step.ch) {
                tracing::warn!(error = %e, "reveal step targets a missing message");
            }
            None
        }
        Msg::RevealFinished { index } => {
            if state.phase == (Phase::Revealing { index }) {
                state.phase = Phase::Idle;
            }
            None
        }
    }
}

fn submit(state: &mut SessionState) -> Option<Effect> {
    if state.is_busy() {
        return None;
    }

    let prompt = state.input.trim().to_string();
    if prompt.is_empty() {
        state.error = Some(EMPTY_PROMPT_ERROR.to_string());
        return None;
    }

    state.error = None;
    state.log.push(Message::user(prompt.clone()));
    state.input.clear();
    state.phase = Phase::AwaitingReply;

    Some(Effect::Dispatch(GenerationRequest {
        prompt,
        model: state.model,
    }))
}

fn reply_received(state: &mut SessionState, result: Result<String, String>) -> Option<Effect> {
    if state.phase != Phase::AwaitingReply {
        tracing::debug!("dropping reply with no request in flight");
        return None;
    }

    match result {
        Ok(markup) => {
            let text = render::to_display_text(&markup);
            let index = state.log.push(Message::bot_placeholder());
            state.phase = Phase::Revealing { index };
            Some(Effect::StartReveal { index, text })
        }
        Err(error) => {
            state.error = Some(error);
            state.phase = Phase::Idle;
            None
        }
    }
}
