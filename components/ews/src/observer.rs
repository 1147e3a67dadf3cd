use store::tracing::{debug, trace};

use crate::{batch::SlotState, types::item::Item};

/// Receives the side effects produced while items are processed. Every
/// method defaults to a no-op.
pub trait EventObserver: Send + Sync {
    fn message_sent(&self, _item: &Item) {}

    fn read_receipt(&self, _item: &Item) {}

    fn slot_completed(&self, _operation: &'static str, _index: usize, _state: &SlotState) {}
}

pub struct TracingObserver;

impl EventObserver for TracingObserver {
    fn message_sent(&self, item: &Item) {
        debug!(
            "Message {:?} submitted for delivery.",
            item.subject().unwrap_or_default()
        );
    }

    fn read_receipt(&self, item: &Item) {
        debug!(
            "Read receipt generated for {:?}.",
            item.subject().unwrap_or_default()
        );
    }

    fn slot_completed(&self, operation: &'static str, index: usize, state: &SlotState) {
        trace!("{} slot {} completed: {:?}", operation, index, state);
    }
}
