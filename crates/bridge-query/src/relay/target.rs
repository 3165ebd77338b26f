//! Initiator-side end of a callback handle.

use super::listener::ResultListener;
use super::{BILLING_RESULT_KEY, CLASS_NAME, SKU_DETAILS_LIST};
use crate::codecs::item::decode_items;
use crate::codecs::EnvelopeCodec;
use bridge_types::{check_envelope, CallbackTarget, Envelope, RelayError, ResultStatus};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Wraps a listener behind the single remote operation `receive`.
///
/// The listener is taken out on the first well-formed reply. A malformed
/// reply leaves it in place; any later reply fails with
/// [`RelayError::AlreadyInvoked`].
pub(crate) struct ListenerTarget {
    listener: Mutex<Option<Box<dyn ResultListener>>>,
}

impl ListenerTarget {
    pub(crate) fn new(listener: Box<dyn ResultListener>) -> Self {
        Self {
            listener: Mutex::new(Some(listener)),
        }
    }
}

impl CallbackTarget for ListenerTarget {
    fn receive(&self, envelope: Envelope) -> Result<(), RelayError> {
        check_envelope(&envelope, CLASS_NAME)?;
        let status = ResultStatus::decode(envelope.get_envelope(BILLING_RESULT_KEY)?)?;
        let items = decode_items(envelope.get_envelope_list(SKU_DETAILS_LIST)?)?;

        let Some(listener) = self.listener.lock().take() else {
            warn!(code = status.code, "Reply arrived for a listener that was already invoked");
            return Err(RelayError::AlreadyInvoked);
        };

        debug!(code = status.code, items = items.len(), "Forwarding reply to listener");
        listener.on_result(status, items);
        Ok(())
    }
}
