//! DTOs shaped for job listing and detail templates.

use serde::Deserialize;

use crate::domain::document::Document;
use crate::domain::job::InstallationJob;
use crate::domain::lead::Lead;
use crate::domain::order::MaterialOrder;
use crate::domain::team::Team;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    pub status: Option<String>,
    pub page: Option<usize>,
}

pub struct JobsPageData {
    pub jobs: Paginated<(InstallationJob, Lead)>,
    pub status_filter: Option<String>,
}

pub struct JobPageData {
    pub job: InstallationJob,
    pub lead: Lead,
    pub team: Option<Team>,
    /// Active teams offered in the assignment dropdown.
    pub teams: Vec<Team>,
    pub orders: Vec<MaterialOrder>,
    pub documents: Vec<Document>,
}

/// Jobs visible in the installer portal, scoped to the member's team.
pub struct InstallerJobsData {
    pub team: Option<Team>,
    pub jobs: Vec<(InstallationJob, Lead)>,
}
