//! Bridge configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use bridge_query::BridgeConfigBuilder;
//!
//! let config = BridgeConfigBuilder::new()
//!     .inbox_capacity(64)
//!     .reply_timeout_ms(500)
//!     .build()
//!     .expect("Valid config");
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on queued call envelopes.
pub const MAX_INBOX_CAPACITY: usize = 100_000;

const ENV_INBOX_CAPACITY: &str = "BRIDGE_INBOX_CAPACITY";
const ENV_REPLY_TIMEOUT_MS: &str = "BRIDGE_REPLY_TIMEOUT_MS";
const ENV_LOG_ITEM_IDS: &str = "BRIDGE_LOG_ITEM_IDS";

/// Runtime settings shared by the client and provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Capacity of the call inbox (1 to [`MAX_INBOX_CAPACITY`])
    pub inbox_capacity: usize,
    /// Default bound for [`PendingReply::wait_timeout`](crate::PendingReply::wait_timeout)
    pub reply_timeout_ms: u64,
    /// Include item identifiers in provider call logs
    pub log_item_ids: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 1000,
            reply_timeout_ms: 3000,
            log_item_ids: true,
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inbox_capacity == 0 || self.inbox_capacity > MAX_INBOX_CAPACITY {
            return Err(ConfigError::InvalidInboxCapacity {
                capacity: self.inbox_capacity,
                max: MAX_INBOX_CAPACITY,
            });
        }

        if self.reply_timeout_ms == 0 {
            return Err(ConfigError::InvalidReplyTimeout {
                timeout_ms: self.reply_timeout_ms,
            });
        }

        Ok(())
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    /// Load from `BRIDGE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = BridgeConfigBuilder::new();

        if let Some(value) = lookup(ENV_INBOX_CAPACITY) {
            builder = builder.inbox_capacity(parse(ENV_INBOX_CAPACITY, &value)?);
        }
        if let Some(value) = lookup(ENV_REPLY_TIMEOUT_MS) {
            builder = builder.reply_timeout_ms(parse(ENV_REPLY_TIMEOUT_MS, &value)?);
        }
        if let Some(value) = lookup(ENV_LOG_ITEM_IDS) {
            let enabled = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid(ENV_LOG_ITEM_IDS, &value)),
            };
            builder = builder.log_item_ids(enabled);
        }

        builder.build()
    }

    /// Builder-style method to set the inbox capacity
    pub fn with_inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = capacity;
        self
    }

    /// Builder-style method to set the reply timeout
    pub fn with_reply_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.reply_timeout_ms = timeout_ms;
        self
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Builder for BridgeConfig with validation
#[derive(Default)]
pub struct BridgeConfigBuilder {
    inbox_capacity: Option<usize>,
    reply_timeout_ms: Option<u64>,
    log_item_ids: Option<bool>,
}

impl BridgeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = Some(capacity);
        self
    }

    pub fn reply_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.reply_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn log_item_ids(mut self, enabled: bool) -> Self {
        self.log_item_ids = Some(enabled);
        self
    }

    /// Build the BridgeConfig, validating all parameters
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        let defaults = BridgeConfig::default();

        let config = BridgeConfig {
            inbox_capacity: self.inbox_capacity.unwrap_or(defaults.inbox_capacity),
            reply_timeout_ms: self.reply_timeout_ms.unwrap_or(defaults.reply_timeout_ms),
            log_item_ids: self.log_item_ids.unwrap_or(defaults.log_item_ids),
        };

        config.validate()?;
        Ok(config)
    }
}
