//! Use-case functions sitting between routes and the repository traits.

pub mod api;
pub mod blog;
pub mod catalog;
pub mod checkout;
pub mod documents;
pub mod errors;
pub mod hr;
pub mod jobs;
pub mod leads;
pub mod notifications;
pub mod orders;
pub mod schedule;
pub mod teams;

pub use errors::{ServiceError, ServiceResult};

use crate::models::auth::{AuthenticatedUser, check_role};

/// Rejects callers that do not carry the required role.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
