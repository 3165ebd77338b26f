//! # Billing-Bridge Demo
//!
//! Starts the in-process bridge, issues one item query and logs the reply.
//!
//! Item ids come from the command line; with none given, a default set is
//! queried as type `inapp`. Set `BRIDGE_QUERY_TYPE` to query another type.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use bridge_query::{BridgeConfig, QueryApi};
use bridge_runtime::{BridgeRuntime, CatalogService};
use bridge_telemetry::{init_logging, TelemetryConfig};
use bridge_types::{ItemType, QueryParameters};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("failed to initialize logging")?;

    let config = BridgeConfig::from_env().context("failed to load bridge configuration")?;
    info!(?config, "Configuration loaded");

    let runtime = BridgeRuntime::start(config, Arc::new(CatalogService::demo()))?;

    let item_type = env::var("BRIDGE_QUERY_TYPE").unwrap_or_else(|_| ItemType::INAPP.to_string());
    let mut ids: Vec<String> = env::args().skip(1).collect();
    if ids.is_empty() {
        ids = vec!["coins_100".to_string(), "remove_ads".to_string()];
    }
    let params = QueryParameters::new(item_type, ids);

    match runtime.client().query_and_wait(params).await {
        Ok(reply) => {
            info!(
                code = reply.status.code,
                debug_message = reply.status.debug_message.as_deref().unwrap_or(""),
                items = reply.items.len(),
                "Reply received"
            );
            for item in &reply.items {
                match item.details() {
                    Ok(details) => info!(
                        product_id = %details.product_id,
                        title = %details.title,
                        price = %details.price,
                        "Item"
                    ),
                    Err(e) => warn!(
                        error = %e,
                        payload = %item.raw_payload,
                        "Unreadable item payload"
                    ),
                }
            }
        }
        Err(e) => warn!(error = %e, "Query failed"),
    }

    let metrics = runtime.metrics().snapshot();
    info!(?metrics, "Bridge metrics");

    runtime.shutdown().await
}
