//! Switch requests from other execution contexts.
//!
//! The scheduler's loop is the only writer of the active slot. Everything
//! else (a network task, a button interrupt) asks for a switch through a
//! [`Selector`], which publishes a complete, freshly initialized
//! [`Activation`] into a [`SwitchSignal`]. The loop drains the signal at the
//! top of its next iteration.

use crate::animation::Activation;
use crate::registry::AnimationRegistry;
use crate::types::{AnimationId, SelectError};
use core::cell::Cell;
use critical_section::Mutex;

/// A one-deep mailbox holding the most recent switch request.
///
/// Publishing overwrites any request the loop has not picked up yet, so the
/// last switch always wins. Safe to share between threads and interrupt
/// handlers; usually placed in a `static`.
pub struct SwitchSignal {
    pending: Mutex<Cell<Option<Activation>>>,
}

impl SwitchSignal {
    /// Creates an empty signal.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Publishes `activation`, replacing any undrained request.
    pub fn signal(&self, activation: Activation) {
        critical_section::with(|cs| self.pending.borrow(cs).set(Some(activation)));
    }

    /// Takes the pending request, leaving the signal empty.
    pub fn take(&self) -> Option<Activation> {
        critical_section::with(|cs| self.pending.borrow(cs).take())
    }

    /// Returns true if a request is waiting.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get().is_some())
    }
}

impl Default for SwitchSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// A cheap handle for requesting animation switches.
///
/// The selection is resolved against the registry on the caller's side: the
/// scheduler receives the new animation together with its fresh state.
#[derive(Clone, Copy)]
pub struct Selector<'a> {
    registry: &'a AnimationRegistry,
    signal: &'a SwitchSignal,
}

impl<'a> Selector<'a> {
    /// Creates a selector publishing into `signal`.
    pub fn new(registry: &'a AnimationRegistry, signal: &'a SwitchSignal) -> Self {
        Self { registry, signal }
    }

    /// Requests a switch to `id`.
    pub fn select(&self, id: AnimationId) {
        self.signal.signal(self.registry.activate(id));
    }

    /// Requests a switch to the animation with raw id `raw`.
    ///
    /// Unknown ids are rejected before anything is published, so the running
    /// animation is unaffected.
    ///
    /// # Errors
    /// * `InvalidArgument` - `raw` does not name an animation
    pub fn select_raw(&self, raw: u8) -> Result<AnimationId, SelectError> {
        let id = AnimationId::try_from(raw)?;
        self.select(id);
        Ok(id)
    }

    /// Returns true if a request is still waiting for the loop.
    pub fn is_pending(&self) -> bool {
        self.signal.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_keeps_only_the_latest_request() {
        let registry = AnimationRegistry::builtin();
        let signal = SwitchSignal::new();

        signal.signal(registry.activate(AnimationId::Blink));
        signal.signal(registry.activate(AnimationId::Pong));

        assert!(signal.is_pending());
        assert_eq!(signal.take().map(|a| a.id()), Some(AnimationId::Pong));
        assert!(!signal.is_pending());
        assert_eq!(signal.take(), None);
    }

    #[test]
    fn rejected_raw_id_publishes_nothing() {
        let registry = AnimationRegistry::builtin();
        let signal = SwitchSignal::new();
        let selector = Selector::new(&registry, &signal);

        selector.select(AnimationId::Fade);
        assert_eq!(
            selector.select_raw(10),
            Err(SelectError::InvalidArgument(10))
        );
        assert_eq!(signal.take().map(|a| a.id()), Some(AnimationId::Fade));
    }
}
