//! # Domain Records
//!
//! The values an initiator and a provider exchange for one query.
//!
//! - **Request**: [`QueryParameters`]
//! - **Reply**: [`ResultStatus`] plus an ordered list of [`ResultItem`]

use serde::{Deserialize, Serialize};

/// Well-known item types.
pub struct ItemType;

impl ItemType {
    /// One-time purchases.
    pub const INAPP: &'static str = "inapp";
    /// Subscriptions.
    pub const SUBS: &'static str = "subs";
}

/// What to look up: an item type and the identifiers of interest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryParameters {
    /// Item type, e.g. `"inapp"` or `"subs"`.
    pub item_type: String,
    /// Identifiers to query. May be empty or absent.
    pub item_identifiers: Option<Vec<String>>,
}

impl QueryParameters {
    pub fn new(item_type: impl Into<String>, item_identifiers: Vec<String>) -> Self {
        Self {
            item_type: item_type.into(),
            item_identifiers: Some(item_identifiers),
        }
    }

    /// Identifiers as a slice, treating an absent list as empty.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        self.item_identifiers.as_deref().unwrap_or(&[])
    }
}

/// Response codes reported by the billing backend.
pub struct ResponseCode;

impl ResponseCode {
    pub const SERVICE_TIMEOUT: i32 = -3;
    pub const FEATURE_NOT_SUPPORTED: i32 = -2;
    pub const SERVICE_DISCONNECTED: i32 = -1;
    pub const OK: i32 = 0;
    pub const USER_CANCELED: i32 = 1;
    pub const SERVICE_UNAVAILABLE: i32 = 2;
    pub const BILLING_UNAVAILABLE: i32 = 3;
    pub const ITEM_UNAVAILABLE: i32 = 4;
    pub const DEVELOPER_ERROR: i32 = 5;
    pub const ERROR: i32 = 6;
    pub const ITEM_ALREADY_OWNED: i32 = 7;
    pub const ITEM_NOT_OWNED: i32 = 8;
}

/// Outcome of a query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultStatus {
    /// One of the [`ResponseCode`] values (not enforced).
    pub code: i32,
    /// Optional human-readable detail.
    pub debug_message: Option<String>,
}

impl ResultStatus {
    pub fn new(code: i32, debug_message: Option<String>) -> Self {
        Self {
            code,
            debug_message,
        }
    }

    /// A successful status with no message.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(ResponseCode::OK, None)
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == ResponseCode::OK
    }
}

/// One result record, carried as an uninterpreted serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultItem {
    pub raw_payload: String,
}

impl ResultItem {
    pub fn new(raw_payload: impl Into<String>) -> Self {
        Self {
            raw_payload: raw_payload.into(),
        }
    }

    /// Parse the payload as item details.
    ///
    /// The payload must be strict JSON. Lenient forms such as unquoted keys
    /// or trailing commas are errors. Codecs never call this; it exists for
    /// hosts that want a typed view.
    pub fn details(&self) -> Result<ItemDetails, serde_json::Error> {
        serde_json::from_str(&self.raw_payload)
    }
}

/// Typed view over the common fields of a [`ResultItem`] payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    #[serde(default)]
    pub product_id: String,
    #[serde(default, rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
}
