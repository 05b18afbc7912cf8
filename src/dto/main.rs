//! DTOs shaped for the leads index page.

use serde::Deserialize;

use crate::domain::lead::Lead;
use crate::pagination::Paginated;

/// Query parameters accepted by the index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// Aggregated data required to render the leads index.
pub struct IndexPageData {
    pub leads: Paginated<Lead>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
}
