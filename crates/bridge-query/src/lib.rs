//! # Bridge Query
//!
//! Marshalling for one cross-process operation: "query item details".
//!
//! ## Architecture
//!
//! - **Codecs** (`codecs/`): one encode/decode pair per record
//!   - `QueryParameters` ↔ `SkuDetailsParams`
//!   - `ResultStatus` ↔ `BillingResult`
//!   - `ResultItem` ↔ `SkuDetails`
//! - **Relay** (`relay/`): local listener ↔ handle ↔ reply sink
//! - **Call Message** (`call.rs`): the `QuerySkuDetailsCall` envelope
//! - **Ports** (`ports/`): `QueryApi` (driving), `QueryService` (driven)
//! - **Services** (`service/`): `QueryClient`, `QueryProvider`
//! - **Merger** (`merger.rs`): combines in-app and subscription halves
//!
//! ## Flow
//!
//! ```text
//! QueryClient::query ──► QueryCall::to_envelope ──► transport.send
//!                                                        │
//! QueryProvider::handle_call ◄── ReceivedQueryCall ◄─────┘
//!        │
//!        └─► QueryService::execute(params, ReplySink) ──► reply() ──► listener
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use bridge_bus::InMemoryTransport;
//! use bridge_query::{BridgeConfig, QueryClient};
//! use bridge_types::QueryParameters;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(InMemoryTransport::new());
//! let client = QueryClient::new(transport.clone(), BridgeConfig::default());
//! let pending = client.query_pending(QueryParameters::new("inapp", vec!["sku1".into()]))?;
//! let reply = pending.wait_timeout(client.config().reply_timeout()).await?;
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod call;
pub mod codecs;
pub mod config;
pub mod error;
pub mod merger;
pub mod metrics;
pub mod ports;
pub mod relay;
pub mod service;

pub use call::{QueryCall, ReceivedQueryCall, QUERY_CALL_TAG};
pub use codecs::{decode_list, encode_list, EnvelopeCodec};
pub use config::{BridgeConfig, BridgeConfigBuilder};
pub use error::{ConfigError, QueryError};
pub use merger::ResultMerger;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{QueryApi, QueryReply, QueryService};
pub use relay::{handle_to_sink, to_handle, ReplySink, ResultListener};
pub use service::{PendingReply, QueryClient, QueryProvider};
