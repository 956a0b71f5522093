//! Typewriter reveal of a finished reply.
//!
//! [`Reveal`] is a lazy sequence of one-character steps aimed at a fixed
//! message index. [`drive`] paces it on a timer and stops as soon as its
//! cancellation token fires, so no step lands after teardown.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Delay between revealed characters.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(30);

/// Append `ch` to the message at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    pub index: usize,
    pub ch: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    Step(RevealStep),
    Finished { index: usize },
}

/// Steps for revealing `text` into the message at `index`, one per char,
/// in order.
#[derive(Debug, Clone)]
pub struct Reveal {
    index: usize,
    text: String,
    pos: usize,
}

impl Reveal {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            pos: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Iterator for Reveal {
    type Item = RevealStep;

    fn next(&mut self) -> Option<RevealStep> {
        let ch = self.text[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(RevealStep {
            index: self.index,
            ch,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.pos;
        (remaining.div_ceil(4), Some(remaining))
    }
}

/// Send each step of `reveal` to `tx`, the first immediately and the rest
/// one `interval` apart, followed by [`RevealEvent::Finished`].
///
/// Returns early without sending anything further once `token` is
/// cancelled or the receiver is gone.
pub async fn drive<T>(
    reveal: Reveal,
    interval: Duration,
    token: CancellationToken,
    tx: mpsc::UnboundedSender<T>,
) where
    T: From<RevealEvent>,
{
    let index = reveal.index();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for step in reveal {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(index, "reveal cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }
        if tx.send(RevealEvent::Step(step).into()).is_err() {
            return;
        }
    }

    if token.is_cancelled() {
        return;
    }
    let _ = tx.send(RevealEvent::Finished { index }.into());
}
