//! Integration flows between initiator and provider.

pub mod e2e_query;
pub mod flows;

/// Route test logs through the libtest writer. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
