//! Pagination window over a materialized view

use serde::{Deserialize, Serialize};

/// Pagination of a materialized row sequence.
///
/// Pages are 1-indexed. `start_item..=end_item` is the 1-based display range
/// of the current page; both are 0 when there is nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start_item: usize,
    pub end_item: usize,
}

impl Pagination {
    /// Compute the window for `page`. A zero page size is treated as 1.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = total_items.div_ceil(page_size);

        let offset = (page - 1).saturating_mul(page_size);
        let end_item = page.saturating_mul(page_size).min(total_items);
        let start_item = if offset < end_item { offset + 1 } else { 0 };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
            start_item,
            end_item: if start_item == 0 { 0 } else { end_item },
        }
    }

    /// Clamp a requested page into `[1, total_pages]`
    pub fn clamp_page(page: usize, total_pages: usize) -> usize {
        page.clamp(1, total_pages.max(1))
    }

    /// Index of the first row on the current page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    /// The rows of the current page: `items[(page-1)*size .. page*size]`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}
