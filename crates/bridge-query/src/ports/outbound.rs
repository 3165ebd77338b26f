//! Outbound Ports (Driven Ports)

use crate::relay::ReplySink;
use bridge_types::QueryParameters;

/// Answers item queries on the provider side.
///
/// `execute` owns the sink and may reply from any thread, at any later
/// time, or not at all. It must not block the provider loop.
pub trait QueryService: Send + Sync {
    fn execute(&self, params: QueryParameters, reply: ReplySink);
}
