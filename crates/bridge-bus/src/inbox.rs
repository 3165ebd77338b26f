//! # Call Inbox
//!
//! The provider-side end of the call channel.

use bridge_types::{from_wire, CodecError, Envelope, RelayError};
use tokio::sync::mpsc;
use tracing::debug;

/// Receives call envelopes sent through an
/// [`InMemoryTransport`](crate::InMemoryTransport).
///
/// Each item is the decoded wire form of one `send`. A wire decode failure is
/// reported per item and does not close the inbox.
pub struct CallInbox {
    receiver: mpsc::Receiver<Vec<u8>>,
}

impl CallInbox {
    pub(crate) fn new(receiver: mpsc::Receiver<Vec<u8>>) -> Self {
        Self { receiver }
    }

    /// Wait for the next call.
    ///
    /// # Returns
    ///
    /// - `Some(Ok(envelope))` - The next call
    /// - `Some(Err(e))` - A call arrived but its bytes could not be decoded
    /// - `None` - The transport was closed and the queue is drained
    pub async fn recv(&mut self) -> Option<Result<Envelope, CodecError>> {
        let bytes = self.receiver.recv().await?;
        debug!(bytes = bytes.len(), "Call received");
        Some(from_wire(&bytes))
    }

    /// Take the next call without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(..))` - A call was queued
    /// - `Ok(None)` - Nothing queued right now
    /// - `Err(RelayError::TransportClosed)` - Closed and drained
    pub fn try_recv(&mut self) -> Result<Option<Result<Envelope, CodecError>>, RelayError> {
        match self.receiver.try_recv() {
            Ok(bytes) => Ok(Some(from_wire(&bytes))),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(RelayError::TransportClosed),
        }
    }
}
