//! JSON API services consumed by the portals.

use crate::domain::lead::Lead;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{LeadListQuery, LeadReader};
use crate::routes::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult};
use crate::models::auth::check_role;
use crate::SERVICE_ACCESS_ROLE;

/// Query parameters accepted by the `/api/v1/leads` service.
#[derive(Debug, Default)]
pub struct LeadsQuery {
    /// Optional free-form search string applied to the lead list.
    pub search: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`list_leads`].
#[derive(Debug)]
pub struct LeadsResponse {
    /// Total number of leads matching the filter.
    pub total: usize,
    /// Page of leads requested by the caller.
    pub leads: Vec<Lead>,
}

/// Returns the filtered list of leads visible to the authenticated user.
pub fn list_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: LeadsQuery,
) -> ServiceResult<LeadsResponse>
where
    R: LeadReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut query = LeadListQuery::new();

    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    let search = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = search {
        query = query.search(term);
    }

    let (total, leads) = repo.list_leads(query)?;

    Ok(LeadsResponse { total, leads })
}
