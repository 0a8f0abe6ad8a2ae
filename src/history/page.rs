//! Pagination over the history log.

use super::record::HistoryRecord;
use serde::Serialize;

/// Number of records fetched per page.
pub const PAGE_SIZE: usize = 10;

/// One page of history, newest first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HistoryPage {
    pub records: Vec<HistoryRecord>,
    pub offset: usize,
    pub total: usize,
    pub has_more: bool,
}

impl HistoryPage {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check if records exist beyond the page starting at `offset`.
pub fn has_more(total: usize, offset: usize, limit: usize) -> bool {
    total > offset.saturating_add(limit)
}

/// Where the history view currently is. Not persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    offset: usize,
    has_more: bool,
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Back to the first page, e.g. when the history view is entered again.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.has_more = false;
    }

    /// Remember whether the page just loaded has a successor.
    pub fn observe(&mut self, page: &HistoryPage) {
        self.has_more = page.has_more;
    }

    /// Move to the next page. Does nothing when there is no next page.
    pub fn advance(&mut self) -> bool {
        if !self.has_more {
            return false;
        }
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        self.has_more = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_boundaries() {
        assert!(!has_more(10, 0, 10));
        assert!(has_more(11, 0, 10));
        assert!(!has_more(20, 10, 10));
        assert!(has_more(21, 10, 10));
        assert!(!has_more(0, 0, 10));
        assert!(!has_more(5, usize::MAX, 10));
        assert!(!has_more(usize::MAX, 1, usize::MAX));
    }

    #[test]
    fn test_cursor_advances_only_with_more() {
        let mut cursor = HistoryCursor::new();
        assert!(!cursor.advance());
        assert_eq!(cursor.offset(), 0);

        cursor.observe(&HistoryPage {
            has_more: true,
            ..Default::default()
        });
        assert!(cursor.advance());
        assert_eq!(cursor.offset(), PAGE_SIZE);

        // Needs a fresh page before moving again
        assert!(!cursor.advance());

        cursor.reset();
        assert_eq!(cursor.offset(), 0);
        assert!(!cursor.has_more());
    }
}
