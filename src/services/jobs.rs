//! Installation job listing, detail, and editing use cases.

use validator::Validate;

use crate::domain::job::{JobStatus, UpdateInstallationJob};
use crate::dto::jobs::{InstallerJobsData, JobPageData, JobsPageData, JobsQuery};
use crate::forms::jobs::UpdateJobForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    DocumentReader, JobListQuery, JobReader, JobWriter, LeadReader, OrderReader, TeamReader,
};
use crate::routes::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_INSTALLER_ROLE};

/// Loads the filtered jobs list with the customer each job belongs to.
pub fn load_jobs_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: JobsQuery,
) -> ServiceResult<JobsPageData>
where
    R: JobReader + LeadReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = query.page.unwrap_or(1);
    let mut list_query = JobListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let status_filter = query
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(status) = &status_filter {
        list_query = list_query.status(status.parse::<JobStatus>()?);
    }

    let (total, jobs) = repo.list_jobs(list_query)?;

    let mut rows = Vec::with_capacity(jobs.len());
    for job in jobs {
        let lead = repo
            .get_lead_by_id(job.lead_id)?
            .ok_or(ServiceError::NotFound)?;
        rows.push((job, lead));
    }

    Ok(JobsPageData {
        jobs: Paginated::new(rows, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE)),
        status_filter,
    })
}

/// Loads the job detail page with lead, team, orders, and documents.
pub fn load_job_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    job_id: i32,
) -> ServiceResult<JobPageData>
where
    R: JobReader + LeadReader + TeamReader + OrderReader + DocumentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let job = repo.get_job_by_id(job_id)?.ok_or(ServiceError::NotFound)?;
    let lead = repo
        .get_lead_by_id(job.lead_id)?
        .ok_or(ServiceError::NotFound)?;

    let team = match job.team_id {
        Some(team_id) => repo.get_team_by_id(team_id)?,
        None => None,
    };

    let teams = repo.list_teams(true)?;
    let orders = repo.list_orders_for_job(job_id)?;
    let documents = repo.list_documents_for_job(job_id)?;

    Ok(JobPageData {
        job,
        lead,
        team,
        teams,
        orders,
        documents,
    })
}

/// Applies the edit form: team assignment, status, booking date, notes.
pub fn update_job<R>(repo: &R, user: &AuthenticatedUser, form: &UpdateJobForm) -> ServiceResult<()>
where
    R: JobReader + JobWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Job form failed validation".to_string()));
    }

    repo.get_job_by_id(form.id)?.ok_or(ServiceError::NotFound)?;

    let updates = UpdateInstallationJob::try_from(form)?;
    repo.update_job(form.id, &updates).map_err(|err| {
        log::error!("Failed to update job: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Jobs for the signed-in installer's team.
pub fn load_installer_jobs<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<InstallerJobsData>
where
    R: JobReader + LeadReader + TeamReader + ?Sized,
{
    ensure_role(user, SERVICE_INSTALLER_ROLE)?;

    let Some(team) = repo.find_team_for_member(&user.email)? else {
        return Ok(InstallerJobsData {
            team: None,
            jobs: Vec::new(),
        });
    };

    let (_, jobs) = repo.list_jobs(JobListQuery::new().team(team.id))?;

    let mut rows = Vec::with_capacity(jobs.len());
    for job in jobs {
        let lead = repo
            .get_lead_by_id(job.lead_id)?
            .ok_or(ServiceError::NotFound)?;
        rows.push((job, lead));
    }

    Ok(InstallerJobsData {
        team: Some(team),
        jobs: rows,
    })
}
