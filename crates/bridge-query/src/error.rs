//! Error types for the query services

use bridge_types::{CodecError, RelayError};
use thiserror::Error;

/// Errors surfaced by [`QueryClient`](crate::QueryClient) and
/// [`QueryProvider`](crate::QueryProvider).
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("No reply within {waited_ms} ms")]
    Timeout { waited_ms: u64 },

    /// The callback was released without ever being invoked.
    #[error("Reply dropped before delivery")]
    ReplyDropped,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Invalid bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid inbox capacity: {capacity} (must be between 1 and {max})")]
    InvalidInboxCapacity { capacity: usize, max: usize },

    #[error("Invalid reply timeout: {timeout_ms} ms (must be greater than 0)")]
    InvalidReplyTimeout { timeout_ms: u64 },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
