//! Callback Relay
//!
//! Turns a local [`ResultListener`] into a [`HandleToken`] that can travel
//! inside an envelope, and turns a received token back into a [`ReplySink`].
//!
//! ```text
//! initiator                               provider
//! listener ─to_handle─► token ──(call)──► handle_to_sink ─► ReplySink
//!    ▲                                                          │
//!    └── ListenerTarget::receive ◄──── reply envelope ◄─ reply()┘
//! ```
//!
//! Reply envelope (`SkuDetailsResponseListener`):
//! - `billing_result`: nested `BillingResult` envelope
//! - `sku_details_list`: ordered list of `SkuDetails` envelopes

mod listener;
mod sink;
mod target;

pub use listener::ResultListener;
pub use sink::ReplySink;

use bridge_types::{HandleToken, HandleTransport, RelayError};
use std::sync::Arc;
use target::ListenerTarget;
use tracing::debug;

const CLASS_NAME: &str = "SkuDetailsResponseListener";
const BILLING_RESULT_KEY: &str = "billing_result";
const SKU_DETAILS_LIST: &str = "sku_details_list";

/// Export `listener` through `transport` and return its handle.
pub fn to_handle<L>(listener: L, transport: &dyn HandleTransport) -> HandleToken
where
    L: ResultListener,
{
    let target = Arc::new(ListenerTarget::new(Box::new(listener)));
    let token = transport.export(target);
    debug!(handle = %token, "Listener exported");
    token
}

/// Recover a callable sink from a handle received in an envelope.
pub fn handle_to_sink(
    token: HandleToken,
    transport: &dyn HandleTransport,
) -> Result<ReplySink, RelayError> {
    let target = transport.import(token)?;
    Ok(ReplySink::new(token, target))
}
