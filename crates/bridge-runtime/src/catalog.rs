//! Static catalog provider
//!
//! Answers queries from a fixed in-memory item list. Queries for a type
//! other than `inapp` or `subs` are split into one lookup per type and
//! combined through a [`ResultMerger`].

use bridge_query::{QueryService, ReplySink, ResultMerger};
use bridge_types::{
    ItemDetails, ItemType, QueryParameters, ResponseCode, ResultItem, ResultStatus,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory item catalog keyed by product id.
#[derive(Debug, Default)]
pub struct CatalogService {
    items: HashMap<String, ItemDetails>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small fixed catalog for the demo binary.
    pub fn demo() -> Self {
        let mut catalog = Self::new();
        catalog.insert(item("coins_100", ItemType::INAPP, "100 Coins", "$0.99"));
        catalog.insert(item("coins_500", ItemType::INAPP, "500 Coins", "$3.99"));
        catalog.insert(item("remove_ads", ItemType::INAPP, "Remove Ads", "$1.99"));
        catalog.insert(item("premium_monthly", ItemType::SUBS, "Premium (Monthly)", "$4.99"));
        catalog.insert(item("premium_yearly", ItemType::SUBS, "Premium (Yearly)", "$39.99"));
        catalog
    }

    pub fn insert(&mut self, details: ItemDetails) {
        self.items.insert(details.product_id.clone(), details);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up `ids` restricted to `item_type`, preserving request order.
    /// Unknown ids are skipped.
    pub fn lookup(&self, item_type: &str, ids: &[String]) -> (ResultStatus, Vec<ResultItem>) {
        let mut items = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(details) = self.items.get(id).filter(|d| d.item_type == item_type) else {
                continue;
            };
            match serde_json::to_string(details) {
                Ok(payload) => items.push(ResultItem::new(payload)),
                Err(e) => {
                    warn!(product_id = %id, error = %e, "Failed to serialize catalog item");
                    return (
                        ResultStatus::new(ResponseCode::ERROR, Some(e.to_string())),
                        Vec::new(),
                    );
                }
            }
        }

        (ResultStatus::ok(), items)
    }
}

impl QueryService for CatalogService {
    fn execute(&self, params: QueryParameters, reply: ReplySink) {
        let ids = params.identifiers();

        if params.item_type == ItemType::INAPP || params.item_type == ItemType::SUBS {
            let (status, items) = self.lookup(&params.item_type, ids);
            if let Err(e) = reply.reply(&status, &items) {
                warn!(error = %e, "Reply not delivered");
            }
            return;
        }

        debug!(item_type = %params.item_type, "Unknown item type, querying both");
        let merger = Arc::new(ResultMerger::new(
            move |status: ResultStatus, items: Vec<ResultItem>| {
                if let Err(e) = reply.reply(&status, &items) {
                    warn!(error = %e, "Merged reply not delivered");
                }
            },
        ));

        let (inapp_status, inapp_items) = self.lookup(ItemType::INAPP, ids);
        let (subs_status, subs_items) = self.lookup(ItemType::SUBS, ids);

        let inapp = Arc::clone(&merger);
        std::thread::spawn(move || inapp.set_inapp_result(inapp_status, Some(inapp_items)));
        std::thread::spawn(move || merger.set_subs_result(subs_status, Some(subs_items)));
    }
}

fn item(id: &str, item_type: &str, title: &str, price: &str) -> ItemDetails {
    ItemDetails {
        product_id: id.to_string(),
        item_type: item_type.to_string(),
        title: title.to_string(),
        description: String::new(),
        price: price.to_string(),
    }
}
