//! Persistent calculation history.
//!
//! Records are appended after every committed calculation, read back one page
//! at a time (newest first) and deleted individually. Deletion is two-phase:
//! requesting a delete yields a [`PendingDelete`] that leaves the store
//! untouched until it is confirmed.

mod page;
mod record;
mod store;

pub use page::{HistoryCursor, HistoryPage, PAGE_SIZE, has_more};
pub use record::{HistoryRecord, TIMESTAMP_FORMAT, Timestamps};
pub use store::{DeleteOutcome, HistoryStore};

/// A delete the user has asked for but not yet confirmed.
///
/// Dropping it cancels the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "a pending delete does nothing until it is confirmed"]
pub struct PendingDelete {
    id: i64,
}

impl PendingDelete {
    pub fn new(id: i64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}
