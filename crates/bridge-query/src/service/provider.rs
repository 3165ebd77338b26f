//! Query Provider
//!
//! Provider side: decodes call envelopes and hands each decoded query to a
//! [`QueryService`]. A call that fails to decode is logged and counted;
//! nothing is sent back, since there may be no usable handle to send on.

use bridge_bus::CallInbox;
use bridge_types::{Envelope, HandleTransport};
use std::sync::Arc;
use tracing::{info, warn};

use crate::call::ReceivedQueryCall;
use crate::config::BridgeConfig;
use crate::error::QueryError;
use crate::metrics::Metrics;
use crate::ports::QueryService;

/// Dispatches incoming calls to a [`QueryService`].
pub struct QueryProvider<S: QueryService> {
    service: Arc<S>,
    transport: Arc<dyn HandleTransport>,
    config: BridgeConfig,
    metrics: Arc<Metrics>,
}

impl<S: QueryService> QueryProvider<S> {
    pub fn new(service: Arc<S>, transport: Arc<dyn HandleTransport>, config: BridgeConfig) -> Self {
        Self {
            service,
            transport,
            config,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Decode one call envelope and pass it to the service.
    pub fn handle_call(&self, envelope: &Envelope) -> Result<(), QueryError> {
        let call = match ReceivedQueryCall::from_envelope(envelope, &*self.transport) {
            Ok(call) => call,
            Err(e) => {
                self.metrics.record_decode_failure();
                warn!(class = envelope.class_tag(), error = %e, "Rejected call");
                return Err(e.into());
            }
        };
        self.metrics.record_call_decoded();

        if self.config.log_item_ids {
            info!(
                handle = %call.reply.token(),
                item_type = %call.params.item_type,
                items = ?call.params.identifiers(),
                "Query received"
            );
        } else {
            info!(
                handle = %call.reply.token(),
                item_type = %call.params.item_type,
                count = call.params.identifiers().len(),
                "Query received"
            );
        }

        self.service.execute(call.params, call.reply);
        Ok(())
    }

    /// Drain `inbox` until the transport closes.
    pub async fn run(self: Arc<Self>, mut inbox: CallInbox) {
        info!("Query provider started");

        while let Some(next) = inbox.recv().await {
            match next {
                // Failures are logged and counted inside handle_call.
                Ok(envelope) => {
                    let _ = self.handle_call(&envelope);
                }
                Err(e) => {
                    self.metrics.record_decode_failure();
                    warn!(error = %e, "Undecodable call bytes");
                }
            }
        }

        info!(
            decoded = self.metrics.snapshot().calls_decoded,
            "Query provider stopped: transport closed"
        );
    }
}
