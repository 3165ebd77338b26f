//! # In-Memory Transport
//!
//! Single-process implementation of [`HandleTransport`].

use crate::inbox::CallInbox;
use crate::registry::HandleRegistry;
use crate::DEFAULT_INBOX_CAPACITY;
use bridge_types::{
    from_wire, to_wire, CallbackTarget, Envelope, HandleToken, HandleTransport, RelayError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Counters kept by the transport.
#[derive(Debug, Default)]
struct Counters {
    calls_sent: AtomicU64,
    handles_exported: AtomicU64,
    replies_delivered: AtomicU64,
    delivery_failures: AtomicU64,
}

/// Point-in-time copy of the transport counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    pub calls_sent: u64,
    pub handles_exported: u64,
    pub replies_delivered: u64,
    pub delivery_failures: u64,
}

/// In-process transport.
///
/// Calls travel over a bounded `tokio::sync::mpsc` channel in their bincode
/// wire form. Replies travel synchronously through proxies handed out by
/// [`HandleTransport::import`].
pub struct InMemoryTransport {
    /// Sending half of the call channel; `None` once closed.
    sender: Mutex<Option<mpsc::Sender<Vec<u8>>>>,

    /// Receiving half, until the provider takes it.
    inbox: Mutex<Option<CallInbox>>,

    /// Exported callback targets.
    registry: Arc<HandleRegistry>,

    counters: Arc<Counters>,

    capacity: usize,
}

impl InMemoryTransport {
    /// Create a transport with the default inbox capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INBOX_CAPACITY)
    }

    /// Create a transport whose call channel holds `capacity` calls.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            sender: Mutex::new(Some(sender)),
            inbox: Mutex::new(Some(CallInbox::new(receiver))),
            registry: Arc::new(HandleRegistry::new()),
            counters: Arc::new(Counters::default()),
            capacity,
        }
    }

    /// Hand the call inbox to the provider. Only the first caller gets it.
    pub fn take_inbox(&self) -> Option<CallInbox> {
        self.inbox.lock().take()
    }

    /// Stop accepting calls. Queued calls remain readable from the inbox,
    /// after which it reports closed.
    pub fn close(&self) {
        if self.sender.lock().take().is_some() {
            debug!("Transport closed");
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Handles exported and not yet delivered or released.
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn stats(&self) -> TransportStats {
        TransportStats {
            calls_sent: self.counters.calls_sent.load(Ordering::Relaxed),
            handles_exported: self.counters.handles_exported.load(Ordering::Relaxed),
            replies_delivered: self.counters.replies_delivered.load(Ordering::Relaxed),
            delivery_failures: self.counters.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleTransport for InMemoryTransport {
    fn send(&self, envelope: Envelope) -> Result<(), RelayError> {
        let bytes = to_wire(&envelope)?;
        let guard = self.sender.lock();
        let sender = guard.as_ref().ok_or(RelayError::TransportClosed)?;

        match sender.try_send(bytes) {
            Ok(()) => {
                self.counters.calls_sent.fetch_add(1, Ordering::Relaxed);
                debug!(class = envelope.class_tag(), "Call sent");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(class = envelope.class_tag(), capacity = self.capacity, "Call inbox full");
                Err(RelayError::Delivery(format!(
                    "call inbox full (capacity {})",
                    self.capacity
                )))
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(RelayError::TransportClosed),
        }
    }

    fn export(&self, target: Arc<dyn CallbackTarget>) -> HandleToken {
        self.counters.handles_exported.fetch_add(1, Ordering::Relaxed);
        self.registry.register(target)
    }

    fn import(&self, token: HandleToken) -> Result<Arc<dyn CallbackTarget>, RelayError> {
        if self.registry.resolve(&token).is_none() {
            return Err(RelayError::UnknownHandle(token));
        }
        Ok(Arc::new(RemoteProxy {
            token,
            registry: Arc::clone(&self.registry),
            counters: Arc::clone(&self.counters),
        }))
    }

    fn release(&self, token: HandleToken) -> bool {
        self.registry.release(&token)
    }
}

/// Provider-side stand-in for an exported target.
struct RemoteProxy {
    token: HandleToken,
    registry: Arc<HandleRegistry>,
    counters: Arc<Counters>,
}

impl RemoteProxy {
    fn deliver(&self, envelope: &Envelope) -> Result<(), RelayError> {
        // Cross the boundary in wire form, as a real transport would.
        let received = from_wire(&to_wire(envelope)?)?;

        let target = self
            .registry
            .resolve(&self.token)
            .ok_or(RelayError::UnknownHandle(self.token))?;

        target.receive(received)?;
        self.registry.release(&self.token);
        Ok(())
    }
}

impl CallbackTarget for RemoteProxy {
    fn receive(&self, envelope: Envelope) -> Result<(), RelayError> {
        match self.deliver(&envelope) {
            Ok(()) => {
                self.counters.replies_delivered.fetch_add(1, Ordering::Relaxed);
                debug!(handle = %self.token, "Reply delivered");
                Ok(())
            }
            Err(e) => {
                self.counters.delivery_failures.fetch_add(1, Ordering::Relaxed);
                warn!(handle = %self.token, error = %e, "Reply delivery failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_types::make_envelope;
    use parking_lot::Mutex as PlMutex;
    use std::time::Duration;
    use tokio::time::timeout;

    /// Records every envelope it receives.
    #[derive(Default)]
    struct Recorder {
        received: PlMutex<Vec<Envelope>>,
    }

    impl CallbackTarget for Recorder {
        fn receive(&self, envelope: Envelope) -> Result<(), RelayError> {
            self.received.lock().push(envelope);
            Ok(())
        }
    }

    struct Refuses;

    impl CallbackTarget for Refuses {
        fn receive(&self, _envelope: Envelope) -> Result<(), RelayError> {
            Err(RelayError::Delivery("refused".to_string()))
        }
    }

    fn call(tag: &str) -> Envelope {
        make_envelope(tag, |e| {
            e.put("n", 1);
        })
    }

    #[tokio::test]
    async fn test_send_reaches_inbox() {
        let transport = InMemoryTransport::new();
        let mut inbox = transport.take_inbox().expect("inbox");

        transport.send(call("QuerySkuDetailsCall")).unwrap();

        let received = timeout(Duration::from_millis(100), inbox.recv())
            .await
            .expect("timeout")
            .expect("call")
            .expect("decodable");
        assert_eq!(received.class_tag(), "QuerySkuDetailsCall");
        assert_eq!(transport.stats().calls_sent, 1);
    }

    #[test]
    fn test_inbox_taken_once() {
        let transport = InMemoryTransport::new();
        assert!(transport.take_inbox().is_some());
        assert!(transport.take_inbox().is_none());
    }

    #[test]
    fn test_send_backpressure() {
        let transport = InMemoryTransport::with_capacity(1);
        transport.send(call("A")).unwrap();
        let result = transport.send(call("B"));
        assert!(matches!(result, Err(RelayError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_close_drains_then_ends() {
        let transport = InMemoryTransport::new();
        let mut inbox = transport.take_inbox().unwrap();

        transport.send(call("A")).unwrap();
        transport.close();

        assert!(transport.is_closed());
        assert!(matches!(transport.send(call("B")), Err(RelayError::TransportClosed)));
        assert!(inbox.recv().await.is_some());
        assert!(inbox.recv().await.is_none());
    }

    #[test]
    fn test_try_recv_empty() {
        let transport = InMemoryTransport::new();
        let mut inbox = transport.take_inbox().unwrap();
        assert!(matches!(inbox.try_recv(), Ok(None)));
    }

    #[test]
    fn test_export_import_delivers_once() {
        let transport = InMemoryTransport::new();
        let recorder = Arc::new(Recorder::default());
        let token = transport.export(recorder.clone());

        let proxy = transport.import(token).unwrap();
        proxy.receive(call("Reply")).unwrap();

        assert_eq!(recorder.received.lock().len(), 1);
        assert_eq!(recorder.received.lock()[0].class_tag(), "Reply");
        assert_eq!(transport.live_handles(), 0);

        // The handle was released by the first delivery.
        let second = proxy.receive(call("Reply"));
        assert!(matches!(second, Err(RelayError::UnknownHandle(t)) if t == token));
        assert_eq!(recorder.received.lock().len(), 1);

        let stats = transport.stats();
        assert_eq!(stats.handles_exported, 1);
        assert_eq!(stats.replies_delivered, 1);
        assert_eq!(stats.delivery_failures, 1);
    }

    #[test]
    fn test_import_unknown_handle() {
        let transport = InMemoryTransport::new();
        let result = transport.import(HandleToken::generate());
        assert!(matches!(result, Err(RelayError::UnknownHandle(_))));
    }

    #[test]
    fn test_target_failure_propagates_and_keeps_handle() {
        let transport = InMemoryTransport::new();
        let token = transport.export(Arc::new(Refuses));
        let proxy = transport.import(token).unwrap();

        let result = proxy.receive(call("Reply"));
        assert!(matches!(result, Err(RelayError::Delivery(_))));
        assert_eq!(transport.live_handles(), 1);
        assert!(transport.release(token));
    }
}
