//! Query Client
//!
//! Initiator side: wraps listeners, ships call envelopes, and offers an
//! awaitable [`PendingReply`] for callers that prefer a future to a callback.

use async_trait::async_trait;
use bridge_types::{HandleToken, HandleTransport, QueryParameters, ResultItem, ResultStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::call::QueryCall;
use crate::config::BridgeConfig;
use crate::error::QueryError;
use crate::metrics::Metrics;
use crate::ports::{QueryApi, QueryReply};
use crate::relay::ResultListener;

/// Issues item queries through a [`HandleTransport`].
pub struct QueryClient {
    transport: Arc<dyn HandleTransport>,
    config: BridgeConfig,
    metrics: Arc<Metrics>,
}

impl QueryClient {
    pub fn new(transport: Arc<dyn HandleTransport>, config: BridgeConfig) -> Self {
        Self {
            transport,
            config,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Share a metrics collector, e.g. with a provider in the same process.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Send one query; `listener` gets the reply on whichever thread the
    /// provider replies from.
    ///
    /// If the transport refuses the call, the exported handle is released
    /// and the listener is dropped uninvoked.
    pub fn query<L: ResultListener>(
        &self,
        params: QueryParameters,
        listener: L,
    ) -> Result<HandleToken, QueryError> {
        let metrics = Arc::clone(&self.metrics);
        let counted = move |status: ResultStatus, items: Vec<ResultItem>| {
            metrics.record_reply_delivered();
            Box::new(listener).on_result(status, items);
        };

        let item_type = params.item_type.clone();
        let (token, envelope) = QueryCall::new(params, counted).export(&*self.transport);

        if let Err(e) = self.transport.send(envelope) {
            self.metrics.record_delivery_failure();
            self.transport.release(token);
            warn!(handle = %token, error = %e, "Query not sent");
            return Err(e.into());
        }

        self.metrics.record_call_sent();
        debug!(handle = %token, item_type = %item_type, "Query sent");
        Ok(token)
    }

    /// Send one query and return a handle on its reply.
    pub fn query_pending(&self, params: QueryParameters) -> Result<PendingReply, QueryError> {
        let (tx, rx) = oneshot::channel();
        let token = self.query(params, move |status: ResultStatus, items: Vec<ResultItem>| {
            let _ = tx.send(QueryReply { status, items });
        })?;

        Ok(PendingReply {
            token,
            receiver: rx,
            transport: Arc::clone(&self.transport),
        })
    }
}

#[async_trait]
impl QueryApi for QueryClient {
    fn query_pending(&self, params: QueryParameters) -> Result<PendingReply, QueryError> {
        QueryClient::query_pending(self, params)
    }

    async fn query_and_wait(&self, params: QueryParameters) -> Result<QueryReply, QueryError> {
        let pending = QueryClient::query_pending(self, params)?;
        pending.wait_timeout(self.config.reply_timeout()).await
    }
}

/// The not-yet-delivered reply to one query.
///
/// Dropping it releases the handle, including when the waiting future is
/// cancelled. A reply that arrives afterwards is refused at the transport.
pub struct PendingReply {
    token: HandleToken,
    receiver: oneshot::Receiver<QueryReply>,
    transport: Arc<dyn HandleTransport>,
}

impl PendingReply {
    /// Handle the provider replies through.
    pub fn token(&self) -> HandleToken {
        self.token
    }

    /// Wait with no bound. Providers are not obliged to reply, so this can
    /// wait forever; prefer [`wait_timeout`](Self::wait_timeout).
    pub async fn wait(mut self) -> Result<QueryReply, QueryError> {
        (&mut self.receiver).await.map_err(|_| QueryError::ReplyDropped)
    }

    /// Wait at most `limit`.
    pub async fn wait_timeout(mut self, limit: Duration) -> Result<QueryReply, QueryError> {
        match tokio::time::timeout(limit, &mut self.receiver).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(QueryError::ReplyDropped),
            Err(_) => {
                debug!(handle = %self.token, "Gave up waiting for reply");
                Err(QueryError::Timeout {
                    waited_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })
            }
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        if self.transport.release(self.token) {
            debug!(handle = %self.token, "Released reply handle");
        }
    }
}
