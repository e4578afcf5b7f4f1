//! Page-count math for offset pagination over the sighting search.
//!
//! The upstream API reports `total_results` and accepts a 1-based `page`;
//! every presentation surface derives its controls from [`PageInfo`] instead
//! of recomputing the arithmetic.

use serde::Serialize;

use crate::sighting::SearchResult;

/// `ceil(total / page_size)`, or `0` when `page_size` is `0`.
#[must_use]
pub fn page_count(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

/// Pagination controls for the current page of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// Controls are only rendered when there is more than one page.
    pub show_controls: bool,
}

impl PageInfo {
    #[must_use]
    pub fn for_result(result: &SearchResult) -> Self {
        let total_pages = result.page_count();
        let current_page = result.page_number.max(1);
        Self {
            current_page,
            total_pages,
            has_previous: current_page > 1,
            has_next: u64::from(current_page) < total_pages,
            show_controls: total_pages > 1,
        }
    }

    /// `"Page {n} of {N}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}
