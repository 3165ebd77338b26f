//! Codec for [`ResultItem`] and ordered lists of them.
//!
//! Items in a list carry no index or key: position is the only link between
//! an encoded list and its decoded counterpart.

use super::{decode_list, encode_list, EnvelopeCodec};
use bridge_types::{check_envelope, make_envelope, CodecError, Envelope, ResultItem};

const CLASS_NAME: &str = "SkuDetails";
const ORIGINAL_JSON_KEY: &str = "original_json";

impl EnvelopeCodec for ResultItem {
    const CLASS_TAG: &'static str = CLASS_NAME;

    fn encode(&self) -> Envelope {
        make_envelope(CLASS_NAME, |e| {
            e.put(ORIGINAL_JSON_KEY, self.raw_payload.as_str());
        })
    }

    fn decode(envelope: &Envelope) -> Result<Self, CodecError> {
        check_envelope(envelope, CLASS_NAME)?;

        Ok(ResultItem::new(envelope.get_str(ORIGINAL_JSON_KEY)?))
    }
}

pub fn encode_items(items: &[ResultItem]) -> Vec<Envelope> {
    encode_list(items)
}

pub fn decode_items(envelopes: &[Envelope]) -> Result<Vec<ResultItem>, CodecError> {
    decode_list(envelopes)
}
