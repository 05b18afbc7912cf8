use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{JobNumber, TypeConstraintError};

/// Lifecycle position of an installation job.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Scheduled,
    InProgress,
    Completed,
    OnHold,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Scheduled => "scheduled",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::OnHold => "on_hold",
        };
        write!(f, "{s}")
    }
}

impl FromStr for JobStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "scheduled" => Ok(JobStatus::Scheduled),
            "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "on_hold" => Ok(JobStatus::OnHold),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown job status: {other}"
            ))),
        }
    }
}

/// Scheduled or in-flight installation work created after payment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InstallationJob {
    pub id: i32,
    pub job_number: String,
    pub lead_id: i32,
    pub team_id: Option<i32>,
    pub status: JobStatus,
    pub scheduled_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewInstallationJob {
    pub job_number: JobNumber,
    pub lead_id: i32,
    pub team_id: Option<i32>,
}

impl NewInstallationJob {
    pub fn new(job_number: JobNumber, lead_id: i32, team_id: Option<i32>) -> Self {
        Self {
            job_number,
            lead_id,
            team_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateInstallationJob {
    pub team_id: Option<i32>,
    pub status: JobStatus,
    pub scheduled_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// One-shot customer self-scheduling credential for a job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScheduleToken {
    pub id: i32,
    pub job_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
    pub used_at: Option<NaiveDateTime>,
}

impl ScheduleToken {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at < now
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct NewScheduleToken {
    pub job_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
}

impl NewScheduleToken {
    pub fn new(job_id: i32, token: String, issued_at: NaiveDateTime, ttl_days: i64) -> Self {
        Self {
            job_id,
            token,
            expires_at: issued_at + Duration::days(ttl_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn token_expiry_and_use_flags() {
        let now = Utc::now().naive_utc();
        let token = ScheduleToken {
            id: 1,
            job_id: 1,
            token: "abc".to_string(),
            expires_at: now + Duration::days(1),
            used_at: None,
        };
        assert!(!token.is_expired(now));
        assert!(!token.is_used());
        assert!(token.is_expired(now + Duration::days(2)));
    }

    #[test]
    fn new_token_applies_ttl() {
        let issued = Utc::now().naive_utc();
        let token = NewScheduleToken::new(7, "t".to_string(), issued, 14);
        assert_eq!(token.expires_at, issued + Duration::days(14));
    }
}
