//! Paginated table view.

use roster_model::{Column, StudentRecord};
use serde::Serialize;

pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// One page of display rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    /// 1-based page number after clamping.
    pub page: usize,
    pub page_count: usize,
    pub page_length: usize,
    pub total_rows: usize,
    pub rows: Vec<Vec<String>>,
}

impl TablePage {
    pub fn headers() -> [&'static str; 9] {
        Column::ALL.map(|column| column.header())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 1-based index of the first row on this page, `0` when empty.
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_length + 1
        }
    }
}

/// Number of pages for `total_rows`; an empty view still has one page.
pub fn page_count(total_rows: usize, page_length: usize) -> usize {
    total_rows.div_ceil(page_length.max(1)).max(1)
}

/// Cuts page `page` (1-based, clamped into range) out of `view`.
pub fn paginate(view: &[&StudentRecord], page: usize, page_length: usize) -> TablePage {
    let page_length = page_length.max(1);
    let page_count = page_count(view.len(), page_length);
    let page = page.clamp(1, page_count);
    let start = (page - 1) * page_length;
    let rows = view
        .iter()
        .skip(start)
        .take(page_length)
        .map(|record| record.cells())
        .collect();
    TablePage {
        page,
        page_count,
        page_length,
        total_rows: view.len(),
        rows,
    }
}
