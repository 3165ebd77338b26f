//! Service Layer
//!
//! - [`QueryClient`]: initiator side, implements [`QueryApi`](crate::QueryApi)
//! - [`QueryProvider`]: provider side, drives a [`QueryService`](crate::QueryService)

pub mod client;
pub mod provider;

pub use client::{PendingReply, QueryClient};
pub use provider::QueryProvider;
