//! # Handle Registry
//!
//! Maps exported [`HandleToken`]s to the local targets behind them.

use bridge_types::{CallbackTarget, HandleToken};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Live callback targets, keyed by token.
///
/// Lookups clone the `Arc` and drop the lock before the caller invokes the
/// target, so a target may itself touch the registry.
#[derive(Default)]
pub struct HandleRegistry {
    targets: RwLock<HashMap<HandleToken, Arc<dyn CallbackTarget>>>,
}

impl HandleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `target` under a freshly generated token.
    pub fn register(&self, target: Arc<dyn CallbackTarget>) -> HandleToken {
        let token = HandleToken::generate();
        self.targets.write().insert(token, target);
        debug!(handle = %token, "Callback handle registered");
        token
    }

    #[must_use]
    pub fn resolve(&self, token: &HandleToken) -> Option<Arc<dyn CallbackTarget>> {
        self.targets.read().get(token).cloned()
    }

    /// Forget a token. Returns whether it was live.
    pub fn release(&self, token: &HandleToken) -> bool {
        let removed = self.targets.write().remove(token).is_some();
        if removed {
            debug!(handle = %token, "Callback handle released");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_types::{Envelope, RelayError};

    struct Noop;

    impl CallbackTarget for Noop {
        fn receive(&self, _envelope: Envelope) -> Result<(), RelayError> {
            Ok(())
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = HandleRegistry::new();
        let token = registry.register(Arc::new(Noop));

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve(&token).is_some());
        assert!(registry.resolve(&HandleToken::generate()).is_none());
    }

    #[test]
    fn test_release() {
        let registry = HandleRegistry::new();
        let token = registry.register(Arc::new(Noop));

        assert!(registry.release(&token));
        assert!(!registry.release(&token));
        assert!(registry.is_empty());
        assert!(registry.resolve(&token).is_none());
    }
}
