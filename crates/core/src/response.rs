//! Paginated response envelope produced by the backend for list
//! queries.

use serde::{Deserialize, Serialize};

/// One page of results plus the pagination bookkeeping needed to render
/// a paginator: `data.len() <= limit`, and `total` counts every match
/// across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}
