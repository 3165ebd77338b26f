//! # Billing-Bridge Test Suite
//!
//! Cross-crate flows exercising initiator and provider together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── e2e_query.rs   # One query, end to end, plus the foreign-tag case
//!     └── flows.rs       # Concurrency, timeouts, stale handles, merging
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bridge-tests
//! cargo test -p bridge-tests integration::flows::
//! ```

pub mod integration;
