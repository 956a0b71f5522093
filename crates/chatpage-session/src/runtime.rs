//! The session event loop.
//!
//! One task owns the [`SessionState`]. Messages arrive on a channel from the
//! UI, from the request task, and from the reveal task; each is applied with
//! [`update`] and the new state is published on a `watch` channel. Effects
//! run as their own tasks and report back on the same channel, so the state
//! never has more than one writer.
//!
//! Teardown cancels a single token. The request and reveal tasks hold child
//! tokens and stop without sending anything further.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use chatpage_core::models::model::ModelSelection;

use crate::api::{ChatApi, DEFAULT_ERROR};
use crate::error::ClientError;
use crate::reveal::{self, Reveal, REVEAL_INTERVAL};
use crate::state::SessionState;
use crate::update::{update, Effect, Msg};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub model: ModelSelection,
    pub reveal_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            model: ModelSelection::default(),
            reveal_interval: REVEAL_INTERVAL,
        }
    }
}

/// Handle to a running session. Dropping it tears the session down.
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Msg>,
    state: watch::Receiver<SessionState>,
    token: CancellationToken,
    task: JoinHandle<()>,
    _guard: DropGuard,
}

impl SessionHandle {
    pub fn send(&self, msg: Msg) -> Result<(), ClientError> {
        self.tx.send(msg).map_err(|_| ClientError::SessionClosed)
    }

    /// Replace the input field contents and submit them.
    pub fn submit_text(&self, text: impl Into<String>) -> Result<(), ClientError> {
        self.send(Msg::InputChanged(text.into()))?;
        self.send(Msg::Submit)
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Cancel everything in flight and wait for the loop to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "session task did not exit cleanly");
        }
    }
}

/// Start a session on the current runtime.
pub fn spawn(api: Arc<dyn ChatApi>, options: SessionOptions) -> SessionHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(SessionState::new(options.model));
    let token = CancellationToken::new();

    let session = Session {
        api,
        reveal_interval: options.reveal_interval,
        state: SessionState::new(options.model),
        tx: tx.clone(),
        state_tx,
        token: token.clone(),
    };
    let task = tokio::spawn(session.run(rx));

    SessionHandle {
        tx,
        state: state_rx,
        _guard: token.clone().drop_guard(),
        token,
        task,
    }
}

struct Session {
    api: Arc<dyn ChatApi>,
    reveal_interval: Duration,
    state: SessionState,
    tx: mpsc::UnboundedSender<Msg>,
    state_tx: watch::Sender<SessionState>,
    token: CancellationToken,
}

impl Session {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Msg>) {
        loop {
            let msg = tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };

            let effect = update(&mut self.state, msg);
            self.state_tx.send_replace(self.state.clone());

            if let Some(effect) = effect {
                self.execute(effect);
            }
        }
        tracing::debug!(messages = self.state.log.len(), "session closed");
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::Dispatch(request) => {
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                let token = self.token.child_token();
                tracing::info!(model = %request.model, prompt_len = request.prompt.len(), "dispatching prompt");
                tokio::spawn(async move {
                    // A panicking client still has to release the busy state.
                    let call = tokio::spawn(async move { api.generate(&request).await });
                    let abort = call.abort_handle();
                    let joined = tokio::select! {
                        _ = token.cancelled() => {
                            abort.abort();
                            return;
                        }
                        joined = call => joined,
                    };
                    let result = match joined {
                        Ok(result) => result.map_err(|e| {
                            tracing::warn!(error = %e, "generation failed");
                            e.to_string()
                        }),
                        Err(e) => {
                            tracing::error!(error = %e, "generation task failed");
                            Err(DEFAULT_ERROR.to_string())
                        }
                    };
                    let _ = tx.send(Msg::ReplyReceived(result));
                });
            }
            Effect::StartReveal { index, text } => {
                tracing::debug!(index, chars = text.chars().count(), "starting reveal");
                tokio::spawn(reveal::drive(
                    Reveal::new(index, text),
                    self.reveal_interval,
                    self.token.child_token(),
                    self.tx.clone(),
                ));
            }
        }
    }
}
