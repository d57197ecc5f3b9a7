//! Table View Controller
//!
//! Sort and pagination state for the project table. The controller never
//! owns rows; callers pass the filtered list and get back the visible page.

pub mod sort;

pub use sort::{sort_projects, ProjectComparator, SortColumn, SortDirection, SortKey};

use crate::core::Project;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Pages shown in the pager when the total exceeds this
const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    sort: Option<SortKey>,
    page: usize,
    page_size: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableView {
    /// A zero page size is treated as one row per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// 1-based current page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Tri-state column selection; always returns to page 1.
    pub fn select_sort(&mut self, column: SortColumn) -> Option<SortKey> {
        self.sort = SortKey::cycle(self.sort, column);
        self.page = 1;
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Called whenever the underlying list changes.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size)
    }

    fn clamp(&self, page: usize, total_rows: usize) -> usize {
        page.clamp(1, self.total_pages(total_rows).max(1))
    }

    /// Jump to `page`, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, total_rows: usize) -> usize {
        self.page = self.clamp(page, total_rows);
        self.page
    }

    pub fn next_page(&mut self, total_rows: usize) -> usize {
        self.set_page(self.page.saturating_add(1), total_rows)
    }

    pub fn prev_page(&mut self, total_rows: usize) -> usize {
        self.set_page(self.page.saturating_sub(1), total_rows)
    }

    /// Page numbers the pager shows, at most five.
    pub fn page_numbers(&self, total_rows: usize) -> Vec<usize> {
        let total = self.total_pages(total_rows);
        if total <= PAGE_WINDOW {
            return (1..=total).collect();
        }

        let current = self.clamp(self.page, total_rows);
        if current <= 2 {
            vec![1, 2, 3]
        } else if current >= total - 1 {
            vec![total - 2, total - 1, total]
        } else {
            vec![current - 1, current, current + 1]
        }
    }

    /// Sorted rows of the current page.
    pub fn visible(&self, projects: &[Project]) -> Vec<Project> {
        let rows = sort_projects(projects, self.sort);
        let page = self.clamp(self.page, rows.len());
        rows.into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }
}
