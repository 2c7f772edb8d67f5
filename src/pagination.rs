//! This module defines the common functionality for paging data.

use serde::Serialize;

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_page_size: 500,
        }
    }
}

/// The paging metadata returned alongside a page of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    /// How many rows match the query across all pages.
    pub total_count: u64,
    /// The page returned, starting at 1.
    pub page: u64,
    /// The number of rows per page.
    pub page_size: u64,
    /// How many pages the matching rows span.
    pub total_pages: u64,
}

impl PageMetadata {
    /// Compute the metadata for `total_count` rows paged by `page_size`.
    pub fn new(total_count: u64, page: u64, page_size: u64) -> Self {
        Self {
            total_count,
            page,
            page_size,
            total_pages: total_count.div_ceil(page_size.max(1)),
        }
    }
}
