//! # Bridge Bus - In-Memory Reference Transport
//!
//! Implements [`HandleTransport`] inside a single process so both halves of
//! a query can be exercised without a real IPC mechanism.
//!
//! ## Behavior
//!
//! - **Calls** are serialized to their wire form and queued on a bounded
//!   channel. The provider drains them through a [`CallInbox`].
//! - **Handles** are kept in a [`HandleRegistry`]. Importing a token yields a
//!   proxy that serializes each reply, resolves the target, and invokes it on
//!   the caller's thread.
//! - **One-shot**: a handle is released after its first successful delivery.
//!   A second reply through the same token fails with `UnknownHandle`.
//!
//! ```text
//! ┌────────────┐  send()   ┌──────────────┐  recv()  ┌────────────┐
//! │ initiator  │ ────────► │  call inbox  │ ───────► │  provider  │
//! │            │           └──────────────┘          │            │
//! │  target ◄──┼──────── registry ◄── proxy.receive ─┤            │
//! └────────────┘                                     └────────────┘
//! ```
//!
//! [`HandleTransport`]: bridge_types::HandleTransport

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod inbox;
pub mod registry;
pub mod transport;

pub use inbox::CallInbox;
pub use registry::HandleRegistry;
pub use transport::{InMemoryTransport, TransportStats};

/// Calls to buffer before `send` reports backpressure.
pub const DEFAULT_INBOX_CAPACITY: usize = 1000;
