//! Typed Codecs
//!
//! One encode/decode pair per domain record, each built on the envelope
//! container. Only the declared fields round-trip; nothing here is a
//! general-purpose serializer.
//!
//! | Record | Class tag | Fields |
//! |--------|-----------|--------|
//! | `QueryParameters` | `SkuDetailsParams` | `sku_type`, `sku_list` |
//! | `ResultStatus` | `BillingResult` | `response_code`, `debug_message` |
//! | `ResultItem` | `SkuDetails` | `original_json` |

pub mod item;
pub mod params;
pub mod status;

use bridge_types::{CodecError, Envelope};

/// Encode/decode pair for one record type.
///
/// `decode` checks the class tag before reading any field.
pub trait EnvelopeCodec: Sized {
    /// Tag stamped by `encode` and required by `decode`.
    const CLASS_TAG: &'static str;

    fn encode(&self) -> Envelope;

    fn decode(envelope: &Envelope) -> Result<Self, CodecError>;
}

/// Encode an ordered list, one envelope per element.
pub fn encode_list<T: EnvelopeCodec>(values: &[T]) -> Vec<Envelope> {
    values.iter().map(EnvelopeCodec::encode).collect()
}

/// Decode an ordered list. Order is preserved; the first bad element fails
/// the whole list.
pub fn decode_list<T: EnvelopeCodec>(envelopes: &[Envelope]) -> Result<Vec<T>, CodecError> {
    envelopes.iter().map(T::decode).collect()
}
