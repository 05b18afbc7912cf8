//! Diesel models for installation jobs and scheduling tokens.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::job::{
    InstallationJob as DomainJob, JobStatus, NewInstallationJob as DomainNewJob,
    NewScheduleToken as DomainNewToken, ScheduleToken as DomainToken,
    UpdateInstallationJob as DomainUpdateJob,
};
use crate::domain::types::TypeConstraintError;
use crate::models::lead::Lead;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(table_name = crate::schema::installation_jobs)]
pub struct InstallationJob {
    pub id: i32,
    pub job_number: String,
    pub lead_id: i32,
    pub team_id: Option<i32>,
    pub status: String,
    pub scheduled_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::installation_jobs)]
pub struct NewInstallationJob {
    pub job_number: String,
    pub lead_id: i32,
    pub team_id: Option<i32>,
    pub status: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::installation_jobs)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateInstallationJob<'a> {
    pub team_id: Option<i32>,
    pub status: String,
    pub scheduled_on: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

impl TryFrom<InstallationJob> for DomainJob {
    type Error = TypeConstraintError;

    fn try_from(job: InstallationJob) -> Result<Self, Self::Error> {
        Ok(Self {
            id: job.id,
            job_number: job.job_number,
            lead_id: job.lead_id,
            team_id: job.team_id,
            status: job.status.parse::<JobStatus>()?,
            scheduled_on: job.scheduled_on,
            notes: job.notes,
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }
}

impl From<&DomainNewJob> for NewInstallationJob {
    fn from(job: &DomainNewJob) -> Self {
        Self {
            job_number: job.job_number.as_str().to_string(),
            lead_id: job.lead_id,
            team_id: job.team_id,
            status: JobStatus::Pending.to_string(),
        }
    }
}

impl<'a> From<&'a DomainUpdateJob> for UpdateInstallationJob<'a> {
    fn from(job: &'a DomainUpdateJob) -> Self {
        Self {
            team_id: job.team_id,
            status: job.status.to_string(),
            scheduled_on: job.scheduled_on,
            notes: job.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(InstallationJob, foreign_key = job_id))]
#[diesel(table_name = crate::schema::schedule_tokens)]
pub struct ScheduleToken {
    pub id: i32,
    pub job_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
    pub used_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::schedule_tokens)]
pub struct NewScheduleToken {
    pub job_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
}

impl From<ScheduleToken> for DomainToken {
    fn from(token: ScheduleToken) -> Self {
        Self {
            id: token.id,
            job_id: token.job_id,
            token: token.token,
            expires_at: token.expires_at,
            used_at: token.used_at,
        }
    }
}

impl From<&DomainNewToken> for NewScheduleToken {
    fn from(token: &DomainNewToken) -> Self {
        Self {
            job_id: token.job_id,
            token: token.token.clone(),
            expires_at: token.expires_at,
        }
    }
}
