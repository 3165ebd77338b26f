//! Call Message
//!
//! The one envelope shipped per request: query parameters plus the handle
//! the provider answers through.
//!
//! ```text
//! QuerySkuDetailsCall {
//!     params:   SkuDetailsParams { sku_type, sku_list }
//!     callback: <handle>
//! }
//! ```
//!
//! Two states, two types: the initiator holds a [`QueryCall`] (params and a
//! local listener); the provider holds a [`ReceivedQueryCall`] (params and a
//! [`ReplySink`]). There are no further transitions.

use crate::codecs::EnvelopeCodec;
use crate::relay::{handle_to_sink, to_handle, ReplySink, ResultListener};
use bridge_types::{
    check_envelope, make_envelope, Envelope, HandleToken, HandleTransport, QueryParameters,
    RelayError,
};
use tracing::debug;

/// Class tag of a call envelope.
pub const QUERY_CALL_TAG: &str = "QuerySkuDetailsCall";
const PARAMS_KEY: &str = "params";
const CALLBACK_KEY: &str = "callback";

/// Initiator side: parameters and the listener that should get the reply.
pub struct QueryCall<L> {
    pub params: QueryParameters,
    pub listener: L,
}

impl<L: ResultListener> QueryCall<L> {
    pub fn new(params: QueryParameters, listener: L) -> Self {
        Self { params, listener }
    }

    /// Export the listener and pack everything into one envelope.
    pub fn to_envelope(self, transport: &dyn HandleTransport) -> Envelope {
        self.export(transport).1
    }

    /// Like [`to_envelope`](Self::to_envelope), also returning the exported
    /// handle so the caller can release it if the call never goes out.
    pub fn export(self, transport: &dyn HandleTransport) -> (HandleToken, Envelope) {
        let params = self.params.encode();
        let handle = to_handle(self.listener, transport);

        let envelope = make_envelope(QUERY_CALL_TAG, |e| {
            e.put(PARAMS_KEY, params).put(CALLBACK_KEY, handle);
        });
        (handle, envelope)
    }
}

/// Provider side: decoded parameters and a sink for the single reply.
#[derive(Debug)]
pub struct ReceivedQueryCall {
    pub params: QueryParameters,
    pub reply: ReplySink,
}

impl ReceivedQueryCall {
    /// Validate the tag, decode the parameters and recover the reply sink.
    pub fn from_envelope(
        envelope: &Envelope,
        transport: &dyn HandleTransport,
    ) -> Result<Self, RelayError> {
        check_envelope(envelope, QUERY_CALL_TAG)?;

        let params = QueryParameters::decode(envelope.get_envelope(PARAMS_KEY)?)?;
        let token = envelope.get_handle(CALLBACK_KEY)?;
        let reply = handle_to_sink(token, transport)?;

        debug!(handle = %token, item_type = %params.item_type, "Call decoded");
        Ok(Self { params, reply })
    }
}
