//! List/search state: a paginated, filterable table of lots.

use crate::api::LotListItem;

/// Search controller state.
#[derive(Debug)]
pub struct Search {
    /// Query input buffer. Empty means an unfiltered listing.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub rows: Vec<LotListItem>,
    pub selected: usize,
    pub loading: bool,
    /// Whether at least one fetch completed, so an empty table renders an
    /// explicit empty-state message instead of nothing.
    pub fetched: bool,
}

impl Search {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            rows: Vec::new(),
            selected: 0,
            loading: false,
            fetched: false,
        }
    }

    /// Apply one fetched page, replacing any previous rows.
    pub fn apply_page(&mut self, items: Vec<LotListItem>) {
        self.rows = items;
        self.selected = 0;
        self.loading = false;
        self.fetched = true;
    }

    pub fn apply_failure(&mut self) {
        self.loading = false;
    }

    pub fn is_empty(&self) -> bool {
        self.fetched && self.rows.is_empty()
    }

    /// The lot id of the highlighted row, if any.
    pub fn selected_lot_id(&self) -> Option<&str> {
        self.rows.get(self.selected).map(|r| r.lot_id.as_str())
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let max = self.rows.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    /// Move to the previous page, clamping at page 1. Returns true when the
    /// page changed and a refetch is needed.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.page += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(lot_id: &str) -> LotListItem {
        LotListItem {
            lot_id: lot_id.to_string(),
            farm_name: "Green Farm".to_string(),
            crop: "Mango".to_string(),
            harvest_date: "2024-01-01".to_string(),
            total_events: 3,
            verified: Some(true),
        }
    }

    #[test]
    fn zero_results_flag_empty_state() {
        let mut search = Search::new(10);
        assert!(!search.is_empty()); // nothing fetched yet
        search.apply_page(Vec::new());
        assert!(search.is_empty());
    }

    #[test]
    fn apply_page_resets_selection() {
        let mut search = Search::new(10);
        search.apply_page(vec![item("LOT-001"), item("LOT-002"), item("LOT-003")]);
        search.select_next();
        search.select_next();
        assert_eq!(search.selected_lot_id(), Some("LOT-003"));

        search.apply_page(vec![item("LOT-009")]);
        assert_eq!(search.selected_lot_id(), Some("LOT-009"));
    }

    #[test]
    fn selection_clamps_to_row_count() {
        let mut search = Search::new(10);
        search.apply_page(vec![item("LOT-001"), item("LOT-002")]);
        search.select_next();
        search.select_next();
        search.select_next();
        assert_eq!(search.selected, 1);
        search.select_prev();
        search.select_prev();
        search.select_prev();
        assert_eq!(search.selected, 0);
    }

    #[test]
    fn paging_clamps_at_page_one() {
        let mut search = Search::new(10);
        assert!(!search.prev_page());
        assert_eq!(search.page, 1);
        assert!(search.next_page());
        assert_eq!(search.page, 2);
        assert!(search.prev_page());
        assert_eq!(search.page, 1);
    }

    #[test]
    fn page_size_is_at_least_one() {
        assert_eq!(Search::new(0).page_size, 1);
    }
}
