//! Ports Layer
//!
//! - Driving port (inbound): [`QueryApi`], what an initiator calls
//! - Driven port (outbound): [`QueryService`], what a provider plugs in

pub mod inbound;
pub mod outbound;

pub use inbound::{QueryApi, QueryReply};
pub use outbound::QueryService;
