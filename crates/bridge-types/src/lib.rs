//! # Bridge Types Crate
//!
//! Everything that crosses the process boundary between an initiator and a
//! provider is defined here.
//!
//! ## Design Principles
//!
//! - **Tag-Checked Envelopes**: Every value travels inside an [`Envelope`]
//!   stamped with a class tag and the protocol version. Decoders check the
//!   tag before touching any field.
//! - **Closed Value Kinds**: A field holds exactly one [`FieldValue`] kind.
//!   Reading it as another kind is a decode failure, never a silent default.
//! - **Transport-Agnostic Handles**: Remote callbacks appear only as opaque
//!   [`HandleToken`]s. Turning a token into something callable is the job of
//!   a [`HandleTransport`] implementation.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod transport;
pub mod wire;

pub use entities::*;
pub use envelope::{
    check_envelope, make_envelope, Envelope, FieldKind, FieldValue, HandleToken, PROTOCOL_VERSION,
};
pub use errors::*;
pub use transport::{CallbackTarget, HandleTransport};
pub use wire::{from_wire, to_wire};
