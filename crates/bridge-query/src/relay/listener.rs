//! The local, one-shot result sink.

use bridge_types::{ResultItem, ResultStatus};

/// Receives the reply to one query.
///
/// Invoked at most once, possibly on a thread other than the one that
/// issued the query, and possibly never (the provider may not reply).
pub trait ResultListener: Send + 'static {
    fn on_result(self: Box<Self>, status: ResultStatus, items: Vec<ResultItem>);
}

impl<F> ResultListener for F
where
    F: FnOnce(ResultStatus, Vec<ResultItem>) + Send + 'static,
{
    fn on_result(self: Box<Self>, status: ResultStatus, items: Vec<ResultItem>) {
        (*self)(status, items);
    }
}
