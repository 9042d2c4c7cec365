//! Engine/presentation channels.
//!
//! The rules engine runs its round/turn loop on one logical thread, the
//! presentation layer on another. They communicate through two
//! one-directional, non-blocking primitives:
//!
//! - [`StateSignal`], engine to presentation: a single level-triggered
//!   "state changed" flag. The engine raises it only after a turn's mutation
//!   batch (draw, play, path update, order rotation) is fully applied, so a
//!   presentation layer that sees the signal and then re-reads a full
//!   snapshot never observes a torn turn. The signal is not a queue: raising
//!   it twice before the consumer polls coalesces into one.
//! - [`MoveMailbox`], presentation to engine: a single-slot mailbox per
//!   interactive player. The engine consumes it only while that player's
//!   turn is suspended awaiting input; turns are strictly sequential, so at
//!   most one decision is ever outstanding.
//!
//! Both are cheap clones around shared state, scoped to one match.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use crate::core::Tile;

/// Level-triggered change notification owned by one `Game`.
///
/// Clone it and hand the clone to the presentation layer; both ends see the
/// same flag.
#[derive(Clone, Debug, Default)]
pub struct StateSignal {
    raised: Arc<AtomicBool>,
}

impl StateSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Called by the engine after every mutation batch.
    pub(crate) fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Consume the signal: returns true if it was raised and clears it.
    ///
    /// The presentation layer calls this once per frame and re-reads the
    /// full snapshot when it returns true.
    #[must_use]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Peek without clearing.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

/// A decision posted by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChosenInput {
    /// The tile to play this turn.
    Tile(Tile),
    /// The connecting face for an ambiguous placement.
    Connection(u8),
}

#[derive(Debug, Default)]
struct MailboxInner {
    slot: Mutex<Option<ChosenInput>>,
    ready: Condvar,
}

/// Single-slot mailbox carrying one interactive player's chosen move.
///
/// Posting overwrites any unconsumed value; the engine validates on take and
/// simply keeps waiting if the value is rejected, so re-posting is always
/// safe.
#[derive(Clone, Debug, Default)]
pub struct MoveMailbox {
    inner: Arc<MailboxInner>,
}

impl MoveMailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a decision, waking the engine if it is parked on this mailbox.
    pub fn post(&self, input: ChosenInput) {
        let mut slot = self
            .inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(input);
        self.inner.ready.notify_one();
    }

    /// Post the tile to play this turn.
    pub fn post_tile(&self, tile: Tile) {
        self.post(ChosenInput::Tile(tile));
    }

    /// Post the connecting face for an ambiguous placement.
    pub fn post_connection(&self, value: u8) {
        self.post(ChosenInput::Connection(value));
    }

    /// Take the pending decision, if any.
    pub(crate) fn take(&self) -> Option<ChosenInput> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Block until a decision is pending, without consuming it.
    pub(crate) fn wait(&self) {
        let mut slot = self
            .inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while slot.is_none() {
            slot = self
                .inner
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}
