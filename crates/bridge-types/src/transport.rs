//! # Transport Capabilities
//!
//! The two seams between the marshalling layer and whatever actually moves
//! bytes between processes.
//!
//! ```text
//!  initiator                                  provider
//!  ─────────                                  ────────
//!  export(target) ──► HandleToken ──send()──► import(token) ──► proxy
//!                                                                 │
//!  target.receive(envelope) ◄────────── proxy.receive(envelope) ◄─┘
//! ```
//!
//! Assumed properties of every implementation:
//!
//! - at most one delivery per `send` or `receive` call
//! - no reordering of invocations through a single handle
//! - synchronous completion: a call returns once the remote handler returns

use crate::envelope::{Envelope, HandleToken};
use crate::errors::RelayError;
use std::sync::Arc;

/// A remotely invokable callback with a single operation.
pub trait CallbackTarget: Send + Sync {
    /// Deliver one reply envelope.
    fn receive(&self, envelope: Envelope) -> Result<(), RelayError>;
}

/// Carries call envelopes to a provider and callback invocations back.
pub trait HandleTransport: Send + Sync {
    /// Carry a call envelope to the provider side.
    fn send(&self, envelope: Envelope) -> Result<(), RelayError>;

    /// Reference-out: make `target` addressable from the other side.
    fn export(&self, target: Arc<dyn CallbackTarget>) -> HandleToken;

    /// Reference-in: obtain a callable proxy for a token received in an
    /// envelope.
    fn import(&self, token: HandleToken) -> Result<Arc<dyn CallbackTarget>, RelayError>;

    /// Forget an exported target without delivering to it. Returns whether
    /// the token was still live.
    fn release(&self, token: HandleToken) -> bool;
}
