//! Codec for [`QueryParameters`].

use super::EnvelopeCodec;
use bridge_types::{check_envelope, make_envelope, CodecError, Envelope, QueryParameters};

const CLASS_NAME: &str = "SkuDetailsParams";
const SKU_TYPE: &str = "sku_type";
const SKU_LIST: &str = "sku_list";

impl EnvelopeCodec for QueryParameters {
    const CLASS_TAG: &'static str = CLASS_NAME;

    fn encode(&self) -> Envelope {
        make_envelope(CLASS_NAME, |e| {
            e.put(SKU_TYPE, self.item_type.as_str());
            // An absent list stays absent rather than becoming empty.
            if let Some(ids) = &self.item_identifiers {
                e.put(SKU_LIST, ids.clone());
            }
        })
    }

    fn decode(envelope: &Envelope) -> Result<Self, CodecError> {
        check_envelope(envelope, CLASS_NAME)?;

        Ok(QueryParameters {
            item_type: envelope.get_str(SKU_TYPE)?.to_string(),
            item_identifiers: envelope.get_optional_str_list(SKU_LIST)?.map(<[String]>::to_vec),
        })
    }
}
