//! Codec for [`ResultStatus`].

use super::EnvelopeCodec;
use bridge_types::{check_envelope, make_envelope, CodecError, Envelope, ResultStatus};

const CLASS_NAME: &str = "BillingResult";
const DEBUG_MESSAGE_KEY: &str = "debug_message";
const RESPONSE_CODE_KEY: &str = "response_code";

impl EnvelopeCodec for ResultStatus {
    const CLASS_TAG: &'static str = CLASS_NAME;

    fn encode(&self) -> Envelope {
        make_envelope(CLASS_NAME, |e| {
            e.put(DEBUG_MESSAGE_KEY, self.debug_message.clone())
                .put(RESPONSE_CODE_KEY, self.code);
        })
    }

    fn decode(envelope: &Envelope) -> Result<Self, CodecError> {
        check_envelope(envelope, CLASS_NAME)?;

        Ok(ResultStatus {
            code: envelope.get_int(RESPONSE_CODE_KEY)?,
            debug_message: envelope
                .get_optional_str(DEBUG_MESSAGE_KEY)?
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_types::ResponseCode;
    use proptest::prelude::*;

    #[test]
    fn test_status_round_trip() {
        let expected = ResultStatus::new(25, Some("debug message".to_string()));
        let actual = ResultStatus::decode(&expected.encode()).unwrap();
        assert_eq!(actual.code, expected.code);
        assert_eq!(actual.debug_message, expected.debug_message);
    }

    #[test]
    fn test_null_debug_message_round_trip() {
        let expected = ResultStatus::new(ResponseCode::ITEM_UNAVAILABLE, None);
        assert_eq!(ResultStatus::decode(&expected.encode()).unwrap(), expected);
    }

    #[test]
    fn test_decode_requires_code() {
        let envelope = make_envelope(CLASS_NAME, |e| {
            e.put(DEBUG_MESSAGE_KEY, "no code");
        });
        let result = ResultStatus::decode(&envelope);
        assert!(matches!(result, Err(e) if e.is_missing_or_wrong_kind()));
    }

    #[test]
    fn test_decode_rejects_other_tag() {
        let envelope = ResultStatus::ok().encode();
        let mut renamed = make_envelope("SkuDetails", |_| {});
        for name in envelope.field_names() {
            if let Some(value) = envelope.get(name) {
                renamed.put(name, value.clone());
            }
        }
        assert!(matches!(
            ResultStatus::decode(&renamed),
            Err(CodecError::FormatMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_status_round_trip(
            code in any::<i32>(),
            message in proptest::option::of(".{0,32}"),
        ) {
            let status = ResultStatus::new(code, message);
            prop_assert_eq!(ResultStatus::decode(&status.encode()).unwrap(), status);
        }
    }
}
