//! Provider-side end of a callback handle.

use super::{BILLING_RESULT_KEY, CLASS_NAME, SKU_DETAILS_LIST};
use crate::codecs::item::encode_items;
use crate::codecs::EnvelopeCodec;
use bridge_types::{
    make_envelope, CallbackTarget, HandleToken, RelayError, ResultItem, ResultStatus,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callable recovered from a received handle.
///
/// `reply` consumes the sink, so a provider holding one can answer at most
/// once. Delivery errors are returned as-is; nothing is retried.
pub struct ReplySink {
    token: HandleToken,
    target: Arc<dyn CallbackTarget>,
}

impl ReplySink {
    pub(crate) fn new(token: HandleToken, target: Arc<dyn CallbackTarget>) -> Self {
        Self { token, target }
    }

    /// The handle this sink answers through.
    #[must_use]
    pub fn token(&self) -> HandleToken {
        self.token
    }

    /// Build one reply envelope and perform one outbound `receive`.
    pub fn reply(self, status: &ResultStatus, items: &[ResultItem]) -> Result<(), RelayError> {
        let envelope = make_envelope(CLASS_NAME, |e| {
            e.put(BILLING_RESULT_KEY, status.encode())
                .put(SKU_DETAILS_LIST, encode_items(items));
        });

        debug!(handle = %self.token, code = status.code, items = items.len(), "Sending reply");
        self.target.receive(envelope)
    }
}

impl fmt::Debug for ReplySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplySink").field("token", &self.token).finish()
    }
}
