use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::job::{JobStatus, UpdateInstallationJob};
use crate::domain::types::TypeConstraintError;

#[derive(Deserialize, Validate)]
/// Form data for editing an installation job.
pub struct UpdateJobForm {
    pub id: i32,
    /// Empty string clears the team assignment.
    pub team_id: Option<String>,
    pub status: String,
    /// ISO date, empty to clear the booking.
    pub scheduled_on: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<&UpdateJobForm> for UpdateInstallationJob {
    type Error = TypeConstraintError;

    fn try_from(form: &UpdateJobForm) -> Result<Self, Self::Error> {
        let team_id = match form.team_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("cannot parse team id: {raw}"))
            })?),
        };

        let scheduled_on = match form.scheduled_on.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<NaiveDate>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("cannot parse date: {raw}"))
            })?),
        };

        Ok(UpdateInstallationJob {
            team_id,
            status: form.status.parse::<JobStatus>()?,
            scheduled_on,
            notes: form
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_team_and_date_clear_fields() {
        let form = UpdateJobForm {
            id: 1,
            team_id: Some("".to_string()),
            status: "pending".to_string(),
            scheduled_on: Some("".to_string()),
            notes: Some("  ".to_string()),
        };
        let updates = UpdateInstallationJob::try_from(&form).expect("valid form");
        assert_eq!(updates.team_id, None);
        assert_eq!(updates.scheduled_on, None);
        assert_eq!(updates.notes, None);
    }

    #[test]
    fn date_and_team_parse() {
        let form = UpdateJobForm {
            id: 1,
            team_id: Some("4".to_string()),
            status: "scheduled".to_string(),
            scheduled_on: Some("2026-08-20".to_string()),
            notes: None,
        };
        let updates = UpdateInstallationJob::try_from(&form).expect("valid form");
        assert_eq!(updates.team_id, Some(4));
        assert_eq!(
            updates.scheduled_on,
            Some(NaiveDate::from_ymd_opt(2026, 8, 20).unwrap())
        );
        assert_eq!(updates.status, JobStatus::Scheduled);
    }
}
