//! Shared query parameter types for API handlers.

use dogland_core::pagination::PageRequest;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Bounds are enforced by the list schemas before this is built; the
/// conversion to [`PageRequest`] clamps again and applies defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }
}

/// Pagination plus resource-specific equality filters from one query string.
#[derive(Debug, Deserialize)]
pub struct ListQuery<F> {
    #[serde(flatten)]
    pub page: PaginationParams,
    #[serde(flatten)]
    pub filter: F,
}
