//! Result merger
//!
//! The billing backend splits items into one-time purchases and
//! subscriptions, but identifiers are unique across both. A provider that
//! does not know the type can query both and merge the two halves here.
//!
//! Merge rules, applied once both halves are in:
//!
//! - one list absent or empty → use the other half unchanged
//! - otherwise the status is the subs status if in-app succeeded and subs
//!   did not, else the in-app status; lists are concatenated, in-app first

use crate::relay::ResultListener;
use bridge_types::{ResultItem, ResultStatus};
use parking_lot::Mutex;
use tracing::debug;

type Half = (ResultStatus, Option<Vec<ResultItem>>);

#[derive(Default)]
struct State {
    inapp: Option<Half>,
    subs: Option<Half>,
}

/// Combines two partial results into one listener call.
///
/// Halves may arrive from different threads in either order. The combined
/// listener is called exactly once, on the thread that delivers the second
/// half; later calls are ignored.
pub struct ResultMerger {
    state: Mutex<State>,
    on_combined: Mutex<Option<Box<dyn ResultListener>>>,
}

impl ResultMerger {
    pub fn new<L: ResultListener>(on_combined: L) -> Self {
        Self {
            state: Mutex::new(State::default()),
            on_combined: Mutex::new(Some(Box::new(on_combined))),
        }
    }

    pub fn set_inapp_result(&self, status: ResultStatus, items: Option<Vec<ResultItem>>) {
        self.state.lock().inapp = Some((status, items));
        self.trigger_if_ready();
    }

    pub fn set_subs_result(&self, status: ResultStatus, items: Option<Vec<ResultItem>>) {
        self.state.lock().subs = Some((status, items));
        self.trigger_if_ready();
    }

    fn trigger_if_ready(&self) {
        let (inapp, subs) = {
            let mut state = self.state.lock();
            if state.inapp.is_none() || state.subs.is_none() {
                return;
            }
            match (state.inapp.take(), state.subs.take()) {
                (Some(inapp), Some(subs)) => (inapp, subs),
                _ => return,
            }
        };

        let Some(listener) = self.on_combined.lock().take() else {
            return;
        };

        let (status, items) = merge(inapp, subs);
        debug!(code = status.code, items = items.len(), "Merged in-app and subs results");
        listener.on_result(status, items);
    }
}

fn merge(inapp: Half, subs: Half) -> (ResultStatus, Vec<ResultItem>) {
    let (inapp_status, inapp_items) = inapp;
    let (subs_status, subs_items) = subs;

    let inapp_items = inapp_items.unwrap_or_default();
    let subs_items = subs_items.unwrap_or_default();

    if subs_items.is_empty() {
        return (inapp_status, inapp_items);
    }
    if inapp_items.is_empty() {
        return (subs_status, subs_items);
    }

    let status = if inapp_status.is_ok() && !subs_status.is_ok() {
        subs_status
    } else {
        inapp_status
    };

    let mut combined = inapp_items;
    combined.extend(subs_items);
    (status, combined)
}
