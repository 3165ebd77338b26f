//! # Integration Flows
//!
//! Client, provider and transport running together:
//!
//! 1. **Routing**: many concurrent queries, each reply reaches its own caller
//! 2. **Abandoned queries**: a timed-out wait releases the handle and a late
//!    reply is refused at the transport
//! 3. **Nullable fields**: absent id lists and debug messages survive the trip
//! 4. **Merging**: an untyped query answered from both item types

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;
    use tokio::time::timeout;

    use bridge_bus::InMemoryTransport;
    use bridge_query::{
        BridgeConfig, QueryApi, QueryClient, QueryError, QueryProvider, QueryService, ReplySink,
    };
    use bridge_runtime::{BridgeRuntime, CatalogService};
    use bridge_types::{QueryParameters, RelayError, ResponseCode, ResultItem, ResultStatus};

    use crate::integration::init_test_logging;

    // =========================================================================
    // TEST SERVICES
    // =========================================================================

    /// Echoes each requested id back as an item payload.
    struct EchoService;

    impl QueryService for EchoService {
        fn execute(&self, params: QueryParameters, reply: ReplySink) {
            let items: Vec<ResultItem> = params
                .identifiers()
                .iter()
                .map(|id| ResultItem::new(id.clone()))
                .collect();
            let _ = reply.reply(&ResultStatus::ok(), &items);
        }
    }

    /// Keeps every sink so the test decides when (and whether) to reply.
    #[derive(Default)]
    struct HoldingService {
        held: Mutex<Vec<(QueryParameters, ReplySink)>>,
    }

    impl QueryService for HoldingService {
        fn execute(&self, params: QueryParameters, reply: ReplySink) {
            self.held.lock().push((params, reply));
        }
    }

    fn spawn_provider<S: QueryService + 'static>(
        service: Arc<S>,
    ) -> (Arc<InMemoryTransport>, QueryClient) {
        let transport = Arc::new(InMemoryTransport::new());
        let inbox = transport.take_inbox().unwrap();
        let provider = Arc::new(QueryProvider::new(
            service,
            transport.clone(),
            BridgeConfig::default(),
        ));
        tokio::spawn(provider.run(inbox));

        let client = QueryClient::new(transport.clone(), BridgeConfig::default());
        (transport, client)
    }

    async fn wait_for_held(service: &HoldingService, count: usize) {
        timeout(Duration::from_secs(3), async {
            while service.held.lock().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("provider should receive the calls");
    }

    /// Delivery releases a handle only after the listener returns, on the
    /// replier's thread.
    async fn wait_for_release(transport: &InMemoryTransport) {
        timeout(Duration::from_secs(3), async {
            while transport.live_handles() > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("handles should be released after delivery");
    }

    // =========================================================================
    // ROUTING
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_queries_route_to_their_callers() {
        init_test_logging();
        let (transport, client) = spawn_provider(Arc::new(EchoService));
        let client = Arc::new(client);

        let mut tasks = Vec::new();
        for i in 0..32 {
            let client = Arc::clone(&client);
            tasks.push(tokio::spawn(async move {
                let ids = vec![format!("item-{i}-a"), format!("item-{i}-b")];
                let reply = client
                    .query_pending(QueryParameters::new("inapp", ids.clone()))
                    .unwrap()
                    .wait_timeout(Duration::from_secs(3))
                    .await
                    .unwrap();
                let got: Vec<String> = reply.items.into_iter().map(|i| i.raw_payload).collect();
                assert_eq!(got, ids);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let stats = client.metrics().snapshot();
        assert_eq!(stats.calls_sent, 32);
        assert_eq!(stats.replies_delivered, 32);
        wait_for_release(&transport).await;
    }

    // =========================================================================
    // ABANDONED QUERIES
    // =========================================================================

    #[tokio::test]
    async fn test_late_reply_after_timeout_is_refused() {
        init_test_logging();
        let service = Arc::new(HoldingService::default());
        let (transport, client) = spawn_provider(Arc::clone(&service));

        let pending = client
            .query_pending(QueryParameters::new("subs", vec!["late".to_string()]))
            .unwrap();
        wait_for_held(&service, 1).await;

        let result = pending.wait_timeout(Duration::from_millis(30)).await;
        assert!(matches!(result, Err(QueryError::Timeout { .. })));
        assert_eq!(transport.live_handles(), 0);

        let (_, sink) = service.held.lock().pop().unwrap();
        let late = sink.reply(&ResultStatus::ok(), &[]);
        assert!(matches!(late, Err(RelayError::UnknownHandle(_))));
        assert_eq!(client.metrics().snapshot().replies_delivered, 0);
    }

    #[tokio::test]
    async fn test_replies_may_arrive_out_of_order() {
        init_test_logging();
        let service = Arc::new(HoldingService::default());
        let (_transport, client) = spawn_provider(Arc::clone(&service));

        let first = client
            .query_pending(QueryParameters::new("inapp", vec!["first".to_string()]))
            .unwrap();
        let second = client
            .query_pending(QueryParameters::new("inapp", vec!["second".to_string()]))
            .unwrap();
        wait_for_held(&service, 2).await;

        // Answer the second call before the first, each from its own thread.
        let mut held = std::mem::take(&mut *service.held.lock());
        let (second_params, second_sink) = held.pop().unwrap();
        let (first_params, first_sink) = held.pop().unwrap();
        std::thread::spawn(move || {
            let items = vec![ResultItem::new(second_params.identifiers()[0].clone())];
            second_sink.reply(&ResultStatus::ok(), &items).unwrap();
        })
        .join()
        .unwrap();
        std::thread::spawn(move || {
            let items = vec![ResultItem::new(first_params.identifiers()[0].clone())];
            first_sink.reply(&ResultStatus::ok(), &items).unwrap();
        })
        .join()
        .unwrap();

        let first = first.wait_timeout(Duration::from_secs(3)).await.unwrap();
        let second = second.wait_timeout(Duration::from_secs(3)).await.unwrap();
        assert_eq!(first.items, vec![ResultItem::new("first")]);
        assert_eq!(second.items, vec![ResultItem::new("second")]);
    }

    // =========================================================================
    // NULLABLE FIELDS
    // =========================================================================

    #[tokio::test]
    async fn test_absent_fields_survive_the_trip() {
        init_test_logging();
        let service = Arc::new(HoldingService::default());
        let (_transport, client) = spawn_provider(Arc::clone(&service));

        let params = QueryParameters {
            item_type: "inapp".to_string(),
            item_identifiers: None,
        };
        let pending = client.query_pending(params.clone()).unwrap();
        wait_for_held(&service, 1).await;

        let (received, sink) = service.held.lock().pop().unwrap();
        assert_eq!(received, params);

        let status = ResultStatus::new(ResponseCode::ITEM_UNAVAILABLE, None);
        sink.reply(&status, &[]).unwrap();

        let reply = pending.wait_timeout(Duration::from_secs(3)).await.unwrap();
        assert_eq!(reply.status, status);
        assert!(reply.items.is_empty());
    }

    // =========================================================================
    // MERGING
    // =========================================================================

    #[tokio::test]
    async fn test_untyped_query_merges_catalog_halves() {
        init_test_logging();
        let runtime =
            BridgeRuntime::start(BridgeConfig::default(), Arc::new(CatalogService::demo()))
                .unwrap();

        let reply = runtime
            .client()
            .query_and_wait(QueryParameters::new(
                "",
                vec![
                    "premium_monthly".to_string(),
                    "coins_100".to_string(),
                    "unknown".to_string(),
                ],
            ))
            .await
            .unwrap();

        assert!(reply.status.is_ok());
        let ids: Vec<String> = reply
            .items
            .iter()
            .map(|item| item.details().unwrap().product_id)
            .collect();
        assert_eq!(ids, vec!["coins_100", "premium_monthly"]);

        runtime.shutdown().await.unwrap();
    }
}
