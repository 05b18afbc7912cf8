//! Customer self-scheduling portal backed by one-shot tokens.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde_json::json;

use crate::domain::job::{InstallationJob, JobStatus, ScheduleToken, UpdateInstallationJob};
use crate::domain::lead::Lead;
use crate::domain::lead_event::{LeadEventType, NewLeadEvent};
use crate::domain::notification::NewEmailNotification;
use crate::domain::types::EmailAddress;
use crate::repository::{
    JobReader, JobWriter, LeadEventWriter, LeadReader, NotificationWriter, ScheduleTokenReader,
    ScheduleTokenWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// Number of weekday slots offered to the customer.
pub const OFFERED_SLOTS: usize = 10;
/// Lead time before the first offered slot.
const LEAD_TIME_DAYS: i64 = 2;

pub struct SchedulePageData {
    pub job: InstallationJob,
    pub lead: Lead,
    pub offered_dates: Vec<NaiveDate>,
    pub token: String,
}

/// The next [`OFFERED_SLOTS`] weekdays, starting after the booking lead time.
pub fn offered_dates(from: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(OFFERED_SLOTS);
    let mut candidate = from + Duration::days(LEAD_TIME_DAYS);
    while dates.len() < OFFERED_SLOTS {
        if !matches!(candidate.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(candidate);
        }
        candidate += Duration::days(1);
    }
    dates
}

fn validate_token<R>(repo: &R, token: &str, now: NaiveDateTime) -> ServiceResult<ScheduleToken>
where
    R: ScheduleTokenReader + ?Sized,
{
    let token = repo
        .get_schedule_token(token)?
        .ok_or_else(|| ServiceError::Form("This scheduling link is not valid.".to_string()))?;

    if token.is_used() {
        return Err(ServiceError::Form(
            "This scheduling link has already been used.".to_string(),
        ));
    }
    if token.is_expired(now) {
        return Err(ServiceError::Form(
            "This scheduling link has expired. Please contact us to book.".to_string(),
        ));
    }

    Ok(token)
}

/// Loads the scheduling page for a token, or a user-facing failure message.
pub fn load_schedule_page<R>(
    repo: &R,
    token: &str,
    now: NaiveDateTime,
) -> ServiceResult<SchedulePageData>
where
    R: ScheduleTokenReader + JobReader + LeadReader + ?Sized,
{
    let valid = validate_token(repo, token, now)?;

    let job = repo
        .get_job_by_id(valid.job_id)?
        .ok_or(ServiceError::NotFound)?;
    let lead = repo
        .get_lead_by_id(job.lead_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(SchedulePageData {
        job,
        lead,
        offered_dates: offered_dates(now.date()),
        token: valid.token,
    })
}

/// Books the chosen date: schedules the job, burns the token, confirms by email.
pub fn book_installation<R>(
    repo: &R,
    token: &str,
    date: NaiveDate,
    now: NaiveDateTime,
) -> ServiceResult<InstallationJob>
where
    R: ScheduleTokenReader
        + ScheduleTokenWriter
        + JobReader
        + JobWriter
        + LeadReader
        + LeadEventWriter
        + NotificationWriter
        + ?Sized,
{
    let valid = validate_token(repo, token, now)?;

    if !offered_dates(now.date()).contains(&date) {
        return Err(ServiceError::Form(
            "That date is not available. Please pick one of the offered days.".to_string(),
        ));
    }

    let job = repo
        .get_job_by_id(valid.job_id)?
        .ok_or(ServiceError::NotFound)?;
    let lead = repo
        .get_lead_by_id(job.lead_id)?
        .ok_or(ServiceError::NotFound)?;

    let job = repo.update_job(
        job.id,
        &UpdateInstallationJob {
            team_id: job.team_id,
            status: JobStatus::Scheduled,
            scheduled_on: Some(date),
            notes: job.notes.clone(),
        },
    )?;
    repo.mark_schedule_token_used(valid.id)?;

    repo.create_lead_event(&NewLeadEvent::new(
        lead.id,
        "customer",
        LeadEventType::Status,
        json!({
            "job_number": job.job_number,
            "scheduled_on": date.to_string(),
        }),
    ))?;

    if let Some(email) = lead.email.as_deref() {
        match EmailAddress::new(email) {
            Ok(recipient) => {
                let notification = NewEmailNotification::new(
                    recipient,
                    format!("Installation booked — job {}", job.job_number),
                    format!(
                        "Hi {},\n\nYour solar installation is booked for {date}.\n\
                         Our crew will arrive in the morning; please keep driveway access clear.\n",
                        lead.name
                    ),
                );
                if let Err(err) = repo.enqueue_notification(&notification) {
                    log::error!("Failed to queue booking confirmation: {err}");
                }
            }
            Err(err) => log::warn!("Lead {} has an invalid email on file: {err}", lead.id),
        }
    }

    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offered_dates_skip_weekends() {
        // 2026-08-06 is a Thursday; lead time lands on Saturday, so the
        // first offered slot must roll to Monday.
        let from = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let dates = offered_dates(from);
        assert_eq!(dates.len(), OFFERED_SLOTS);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 8, 10).unwrap());
        assert!(
            dates
                .iter()
                .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        );
    }

    #[test]
    fn offered_dates_are_strictly_increasing() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let dates = offered_dates(from);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }
}
