//! # Billing-Bridge Runtime
//!
//! Wires both halves of the bridge inside one process:
//!
//! ```text
//! QueryClient ──► InMemoryTransport ──► QueryProvider ──► CatalogService
//!      ▲                                                       │
//!      └──────────────────── reply via handle ◄────────────────┘
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env)
//! 2. Build the transport with the configured inbox capacity
//! 3. Spawn the provider loop on the call inbox
//! 4. Hand out a client sharing the same metrics

pub mod catalog;

use anyhow::{Context, Result};
use bridge_bus::InMemoryTransport;
use bridge_query::{BridgeConfig, Metrics, QueryClient, QueryProvider, QueryService};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub use catalog::CatalogService;

/// How long `shutdown` waits for the provider loop to drain.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// A running initiator/provider pair.
pub struct BridgeRuntime {
    transport: Arc<InMemoryTransport>,
    client: QueryClient,
    metrics: Arc<Metrics>,
    provider_task: JoinHandle<()>,
}

impl BridgeRuntime {
    /// Start the provider loop for `service`. Must be called from within a
    /// tokio runtime.
    pub fn start<S>(config: BridgeConfig, service: Arc<S>) -> Result<Self>
    where
        S: QueryService + 'static,
    {
        config.validate().context("invalid bridge configuration")?;

        let transport = Arc::new(InMemoryTransport::with_capacity(config.inbox_capacity));
        let inbox = transport
            .take_inbox()
            .context("call inbox already taken")?;
        let metrics = Arc::new(Metrics::new());

        let provider = Arc::new(
            QueryProvider::new(service, transport.clone(), config.clone())
                .with_metrics(Arc::clone(&metrics)),
        );
        let provider_task = tokio::spawn(provider.run(inbox));

        let client =
            QueryClient::new(transport.clone(), config).with_metrics(Arc::clone(&metrics));

        info!(capacity = transport.capacity(), "Bridge runtime started");
        Ok(Self {
            transport,
            client,
            metrics,
            provider_task,
        })
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn transport(&self) -> &Arc<InMemoryTransport> {
        &self.transport
    }

    /// Close the transport and wait for the provider loop to finish.
    pub async fn shutdown(self) -> Result<()> {
        self.transport.close();

        match tokio::time::timeout(SHUTDOWN_GRACE, self.provider_task).await {
            Ok(joined) => joined.context("provider task failed")?,
            Err(_) => warn!("Provider loop did not stop within the grace period"),
        }

        let stats = self.transport.stats();
        info!(
            calls = stats.calls_sent,
            replies = stats.replies_delivered,
            live_handles = self.transport.live_handles(),
            "Bridge runtime stopped"
        );
        Ok(())
    }
}
