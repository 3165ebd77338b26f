//! # Error Types
//!
//! Decode failures and callback delivery failures.

use crate::envelope::{FieldKind, HandleToken};
use thiserror::Error;

/// Errors raised while decoding an envelope.
///
/// Every decode boundary is a hard stop: there is no partial decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The envelope's class tag is not the one the decoder expects.
    #[error("Provided class ({found}) does not match expected class ({expected})")]
    FormatMismatch { expected: String, found: String },

    /// A required field is absent (or null where null is not allowed).
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A field holds a value of another kind.
    #[error("Field {field} holds a {found}, expected a {expected}")]
    WrongFieldKind {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },

    /// The byte-level wire form could not be read or written.
    #[error("Wire format error: {0}")]
    Wire(String),
}

impl CodecError {
    pub(crate) fn missing(field: &str) -> Self {
        CodecError::MissingField {
            field: field.to_string(),
        }
    }

    /// True for the missing-or-wrong-kind family of failures.
    #[must_use]
    pub fn is_missing_or_wrong_kind(&self) -> bool {
        matches!(
            self,
            CodecError::MissingField { .. } | CodecError::WrongFieldKind { .. }
        )
    }
}

/// Errors raised while delivering a reply through a callback handle.
///
/// Nothing in the relay retries; these propagate to whoever triggered the
/// delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The reply envelope could not be decoded on the receiving side.
    #[error("Decode failed: {0}")]
    Decode(#[from] CodecError),

    /// The transport has no live target for this handle.
    #[error("Unknown or released callback handle: {0}")]
    UnknownHandle(HandleToken),

    /// The callback behind this handle already received its reply.
    #[error("Callback was already invoked")]
    AlreadyInvoked,

    /// The transport is shut down.
    #[error("Transport closed")]
    TransportClosed,

    /// Any other transport-level failure.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}
