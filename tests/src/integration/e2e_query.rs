//! # End-to-End Query
//!
//! One query crossing the in-memory transport in both directions:
//!
//! 1. Initiator builds a `QuerySkuDetailsCall` and sends it
//! 2. Provider decodes it and replies through the embedded handle
//! 3. Initiator's listener receives exactly what the provider sent, once
//!
//! Plus the rejection path: an envelope with a foreign class tag fails
//! before any field is read.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use bridge_bus::InMemoryTransport;
    use bridge_query::{QueryCall, ReceivedQueryCall, QUERY_CALL_TAG};
    use bridge_types::{
        make_envelope, CodecError, HandleTransport, QueryParameters, RelayError, ResultItem,
        ResultStatus, PROTOCOL_VERSION,
    };

    use crate::integration::init_test_logging;

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn skus() -> Vec<String> {
        vec!["sku1".to_string(), "sku2".to_string()]
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[tokio::test]
    async fn test_query_round_trip_over_transport() {
        init_test_logging();
        let transport = Arc::new(InMemoryTransport::new());
        let mut inbox = transport.take_inbox().unwrap();

        // Initiator
        let (tx, mut rx) = mpsc::unbounded_channel();
        let call = QueryCall::new(
            QueryParameters::new("inapp", skus()),
            move |status: ResultStatus, items: Vec<ResultItem>| {
                let _ = tx.send((status, items));
            },
        );
        let envelope = call.to_envelope(&*transport);
        assert_eq!(envelope.version(), PROTOCOL_VERSION);
        transport.send(envelope).unwrap();

        // Provider, on its own task
        let provider_transport = Arc::clone(&transport);
        let provider = tokio::spawn(async move {
            let envelope = inbox.recv().await.unwrap().unwrap();
            let call = ReceivedQueryCall::from_envelope(&envelope, &*provider_transport).unwrap();
            assert_eq!(call.params, QueryParameters::new("inapp", skus()));

            let items = vec![ResultItem::new("{}"), ResultItem::new("{}")];
            call.reply
                .reply(&ResultStatus::new(23, Some("ok".to_string())), &items)
                .unwrap();
        });
        timeout(Duration::from_secs(3), provider)
            .await
            .expect("provider should finish")
            .unwrap();

        // Listener fired exactly once with the provider's values
        let (status, items) = timeout(Duration::from_secs(3), rx.recv())
            .await
            .expect("listener should fire")
            .unwrap();
        assert_eq!(status.code, 23);
        assert_eq!(status.debug_message.as_deref(), Some("ok"));
        assert_eq!(items, vec![ResultItem::new("{}"), ResultItem::new("{}")]);

        // The listener closure (and its sender) is gone once delivered
        assert!(rx.recv().await.is_none());
        assert_eq!(transport.live_handles(), 0);
    }

    // =========================================================================
    // REJECTION PATH
    // =========================================================================

    #[tokio::test]
    async fn test_foreign_tag_is_rejected_before_fields() {
        init_test_logging();
        let transport = Arc::new(InMemoryTransport::new());
        let mut inbox = transport.take_inbox().unwrap();

        // A well-formed call body under the wrong tag
        let stale = QueryCall::new(
            QueryParameters::new("inapp", skus()),
            |_: ResultStatus, _: Vec<ResultItem>| {},
        )
        .to_envelope(&*transport);
        let mut foreign = make_envelope("Foo", |_| {});
        for name in stale.field_names() {
            if let Some(value) = stale.get(name) {
                foreign.put(name, value.clone());
            }
        }
        transport.send(foreign).unwrap();

        let received = inbox.recv().await.unwrap().unwrap();
        let result = ReceivedQueryCall::from_envelope(&received, &*transport);

        match result {
            Err(RelayError::Decode(CodecError::FormatMismatch { expected, found })) => {
                assert_eq!(expected, QUERY_CALL_TAG);
                assert_eq!(found, "Foo");
            }
            other => panic!("expected FormatMismatch, got {other:?}"),
        }
    }
}
