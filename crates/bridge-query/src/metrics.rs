//! Counters for query traffic
//!
//! Shared by [`QueryClient`](crate::QueryClient) and
//! [`QueryProvider`](crate::QueryProvider); read with [`Metrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for calls and replies.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Call envelopes handed to the transport
    pub calls_sent: AtomicU64,
    /// Call envelopes decoded by the provider
    pub calls_decoded: AtomicU64,
    /// Incoming envelopes that failed to decode
    pub decode_failures: AtomicU64,
    /// Replies that reached a listener
    pub replies_delivered: AtomicU64,
    /// Calls the transport refused to send
    pub delivery_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call_sent(&self) {
        self.calls_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_call_decoded(&self) {
        self.calls_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reply_delivered(&self) {
        self.replies_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_failure(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls_sent: self.calls_sent.load(Ordering::Relaxed),
            calls_decoded: self.calls_decoded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            replies_delivered: self.replies_delivered.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`Metrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub calls_sent: u64,
    pub calls_decoded: u64,
    pub decode_failures: u64,
    pub replies_delivered: u64,
    pub delivery_failures: u64,
}
