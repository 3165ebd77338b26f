//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use bridge_types::{QueryParameters, ResultItem, ResultStatus};

use crate::error::QueryError;
use crate::service::PendingReply;

/// Status and items delivered for one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryReply {
    pub status: ResultStatus,
    pub items: Vec<ResultItem>,
}

/// Initiator-side query API (Driving Port)
#[async_trait]
pub trait QueryApi: Send + Sync {
    /// Send a query and return a future-like handle on its reply.
    fn query_pending(&self, params: QueryParameters) -> Result<PendingReply, QueryError>;

    /// Send a query and wait for the reply, bounded by the configured
    /// reply timeout.
    async fn query_and_wait(&self, params: QueryParameters) -> Result<QueryReply, QueryError>;
}
