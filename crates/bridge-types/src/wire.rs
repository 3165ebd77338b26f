//! Byte-level wire form of an [`Envelope`] (bincode).

use crate::envelope::Envelope;
use crate::errors::CodecError;

/// Serialize an envelope for a byte-oriented transport.
pub fn to_wire(envelope: &Envelope) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(envelope).map_err(|e| CodecError::Wire(e.to_string()))
}

/// Read back an envelope written by [`to_wire`].
pub fn from_wire(bytes: &[u8]) -> Result<Envelope, CodecError> {
    bincode::deserialize(bytes).map_err(|e| CodecError::Wire(e.to_string()))
}
