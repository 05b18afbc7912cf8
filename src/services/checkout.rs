//! Payment-webhook automation: turns a paid lead into an installation job.
//!
//! The flow mirrors the payment provider's delivery model: repository errors
//! before the job exists propagate so the provider retries, while follow-on
//! work (material orders, the scheduling invitation) only logs on failure —
//! the job must survive even when those steps do not.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use hmac::{Hmac, Mac};
use rand::distr::{Alphanumeric, SampleString};
use serde_json::json;
use sha2::Sha256;
use thiserror::Error;

use crate::domain::geo::GeoPoint;
use crate::domain::job::{InstallationJob, NewInstallationJob, NewScheduleToken};
use crate::domain::lead::{Lead, LeadStatus};
use crate::domain::lead_event::{LeadEventType, NewLeadEvent};
use crate::domain::notification::NewEmailNotification;
use crate::domain::order::{NewMaterialOrder, NewOrderLine};
use crate::domain::types::{EmailAddress, JobNumber, TypeConstraintError};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    JobReader, JobWriter, LeadEventWriter, LeadReader, LeadWriter, NotificationWriter,
    OrderWriter, ScheduleTokenWriter, TeamReader,
};
use crate::services::ServiceResult;
use crate::services::teams::match_team;

type HmacSha256 = Hmac<Sha256>;

/// Seconds of clock skew tolerated on the signature timestamp.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

const SCHEDULE_TOKEN_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("malformed signature header")]
    Malformed,
    #[error("signature timestamp outside tolerance")]
    Expired,
    #[error("signature mismatch")]
    Mismatch,
}

/// Verifies a `t=<unix>,v1=<hex>` signature header over `"{t}.{payload}"`.
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signature = Some(value.to_string()),
            _ => {}
        }
    }

    let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
        return Err(SignatureError::Malformed);
    };

    if (now - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(SignatureError::Expired);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::Malformed)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = hex::encode(mac.finalize().into_bytes());

    if expected == signature.to_lowercase() {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Computes a valid signature header; used by tests and local tooling.
pub fn sign_payload(secret: &str, payload: &[u8], timestamp: i64) -> String {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}

/// A completed checkout session relevant to job creation.
#[derive(Debug, Clone)]
pub struct CheckoutEvent {
    pub session_id: String,
    pub lead_id: i32,
    pub amount_cents: i64,
    pub customer_email: Option<String>,
}

/// Static inputs the automation needs besides the repository.
#[derive(Debug, Clone)]
pub struct CheckoutContext {
    pub today: NaiveDate,
    pub base_url: String,
    pub token_ttl_days: i64,
}

#[derive(Debug)]
pub enum CheckoutOutcome {
    Created {
        job: InstallationJob,
        orders_created: usize,
    },
    AlreadyProcessed,
    UnknownLead,
}

/// Next job number for the day, continuing from the last one issued.
///
/// An unparseable latest number restarts the day's sequence at 1; the unique
/// index on `job_number` surfaces any resulting collision instead of silently
/// reusing a number.
pub fn next_job_number(
    today: NaiveDate,
    last: Option<&str>,
) -> Result<JobNumber, TypeConstraintError> {
    let prefix = format!("J{}", today.format("%Y%m%d"));
    let seq = last
        .and_then(JobNumber::parse_parts)
        .map(|(_, seq)| seq + 1)
        .unwrap_or(1);
    JobNumber::new(format!("{prefix}-{seq:03}"))
}

fn lead_point(lead: &Lead) -> Option<GeoPoint> {
    match (lead.lat, lead.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    }
}

/// Processes a `checkout.session.completed` delivery end to end.
pub fn process_checkout<R>(
    repo: &R,
    event: &CheckoutEvent,
    ctx: &CheckoutContext,
) -> ServiceResult<CheckoutOutcome>
where
    R: LeadReader
        + LeadWriter
        + LeadEventWriter
        + JobReader
        + JobWriter
        + TeamReader
        + OrderWriter
        + ScheduleTokenWriter
        + NotificationWriter
        + ?Sized,
{
    let lead = match repo.get_lead_by_id(event.lead_id)? {
        Some(lead) => lead,
        None => {
            log::warn!(
                "Ignoring checkout {} for unknown lead {}",
                event.session_id,
                event.lead_id
            );
            return Ok(CheckoutOutcome::UnknownLead);
        }
    };

    if let Some(existing) = repo.get_job_by_lead_id(lead.id)? {
        log::info!(
            "Duplicate checkout delivery for lead {}; job {} already exists",
            lead.id,
            existing.job_number
        );
        return Ok(CheckoutOutcome::AlreadyProcessed);
    }

    repo.set_lead_status(lead.id, LeadStatus::Paid)?;
    repo.create_lead_event(&NewLeadEvent::new(
        lead.id,
        "system",
        LeadEventType::Payment,
        json!({
            "session_id": event.session_id,
            "amount_cents": event.amount_cents,
        }),
    ))?;

    let prefix = format!("J{}", ctx.today.format("%Y%m%d"));
    let last = repo.latest_job_number_with_prefix(&prefix)?;
    let job_number = next_job_number(ctx.today, last.as_deref())?;

    let teams = repo.list_teams(true)?;
    let team_id = match_team(&teams, lead.suburb.as_deref(), lead_point(&lead)).map(|t| t.id);
    if team_id.is_none() {
        log::warn!("No team matched lead {}; job will start unassigned", lead.id);
    }

    let new_job = NewInstallationJob::new(job_number, lead.id, team_id);
    let job = match repo.create_job(&new_job) {
        Ok(job) => job,
        Err(RepositoryError::ConstraintViolation(message)) => {
            // Lost the race against a concurrent delivery of the same event;
            // same answer as the lookup above.
            log::info!(
                "Job for lead {} already created concurrently: {message}",
                lead.id
            );
            return Ok(CheckoutOutcome::AlreadyProcessed);
        }
        Err(err) => return Err(err.into()),
    };

    let orders_created = match generate_material_orders(repo, &job) {
        Ok(count) => count,
        Err(err) => {
            log::error!(
                "Failed to generate material orders for job {}: {err}",
                job.job_number
            );
            0
        }
    };

    if let Err(err) = issue_schedule_invitation(repo, &lead, &job, event, ctx) {
        log::error!(
            "Failed to issue scheduling invitation for job {}: {err}",
            job.job_number
        );
    }

    Ok(CheckoutOutcome::Created {
        job,
        orders_created,
    })
}

/// One draft purchase order per supplier from the lead's quote selection.
fn generate_material_orders<R>(repo: &R, job: &InstallationJob) -> ServiceResult<usize>
where
    R: LeadReader + OrderWriter + ?Sized,
{
    let quote_items = repo.list_quote_items(job.lead_id)?;
    if quote_items.is_empty() {
        log::info!("Lead {} has no quote lines; nothing to order", job.lead_id);
        return Ok(0);
    }

    let mut by_supplier: BTreeMap<i32, Vec<NewOrderLine>> = BTreeMap::new();
    for (item, component) in &quote_items {
        by_supplier
            .entry(component.supplier_id)
            .or_default()
            .push(NewOrderLine {
                component_id: component.id,
                quantity: item.quantity,
                unit_price_cents: component.unit_price_cents,
            });
    }

    let mut created = 0;
    for (n, (supplier_id, lines)) in by_supplier.into_iter().enumerate() {
        let new_order = NewMaterialOrder {
            order_number: format!("PO-{}-{}", job.job_number, n + 1),
            job_id: job.id,
            supplier_id,
        };
        repo.create_order(&new_order, &lines)?;
        created += 1;
    }

    Ok(created)
}

/// Issues the one-shot scheduling token and queues the invitation email.
fn issue_schedule_invitation<R>(
    repo: &R,
    lead: &Lead,
    job: &InstallationJob,
    event: &CheckoutEvent,
    ctx: &CheckoutContext,
) -> ServiceResult<()>
where
    R: ScheduleTokenWriter + NotificationWriter + ?Sized,
{
    let token = Alphanumeric.sample_string(&mut rand::rng(), SCHEDULE_TOKEN_LEN);
    let new_token = NewScheduleToken::new(
        job.id,
        token.clone(),
        Utc::now().naive_utc(),
        ctx.token_ttl_days,
    );
    repo.create_schedule_token(&new_token)?;

    let recipient = event
        .customer_email
        .as_deref()
        .or(lead.email.as_deref());
    let Some(recipient) = recipient else {
        log::info!(
            "Lead {} has no email; scheduling link for job {} not sent",
            lead.id,
            job.job_number
        );
        return Ok(());
    };

    let recipient = EmailAddress::new(recipient)?;
    let link = format!("{}/schedule/{token}", ctx.base_url.trim_end_matches('/'));
    let notification = NewEmailNotification::new(
        recipient,
        format!("Book your solar installation — job {}", job.job_number),
        format!(
            "Hi {},\n\nThanks for your payment. Your installation job {} is ready to book.\n\
             Pick a date here: {link}\n\nThe link expires in {} days.\n",
            lead.name, job.job_number, ctx.token_ttl_days
        ),
    );
    repo.enqueue_notification(&notification)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_job_of_the_day_starts_at_one() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let number = next_job_number(today, None).unwrap();
        assert_eq!(number.as_str(), "J20260806-001");
    }

    #[test]
    fn sequence_continues_from_latest() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let number = next_job_number(today, Some("J20260806-007")).unwrap();
        assert_eq!(number.as_str(), "J20260806-008");
    }

    #[test]
    fn unparseable_latest_restarts_sequence() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let number = next_job_number(today, Some("JOB-garbage")).unwrap();
        assert_eq!(number.as_str(), "J20260806-001");
    }

    #[test]
    fn rollover_changes_prefix_not_sequence_logic() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        // Yesterday's numbers never reach the generator; the repository
        // query is prefix-scoped, so `last` is None on a fresh day.
        let number = next_job_number(today, None).unwrap();
        assert_eq!(number.as_str(), "J20260807-001");
    }

    #[test]
    fn signature_round_trip() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = sign_payload("whsec_test", payload, 1_700_000_000);
        assert_eq!(
            verify_signature("whsec_test", &header, payload, 1_700_000_010),
            Ok(())
        );
    }

    #[test]
    fn signature_rejects_wrong_secret_and_skew() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = sign_payload("whsec_test", payload, 1_700_000_000);

        assert_eq!(
            verify_signature("whsec_other", &header, payload, 1_700_000_010),
            Err(SignatureError::Mismatch)
        );
        assert_eq!(
            verify_signature(
                "whsec_test",
                &header,
                payload,
                1_700_000_000 + SIGNATURE_TOLERANCE_SECS + 1
            ),
            Err(SignatureError::Expired)
        );
        assert_eq!(
            verify_signature("whsec_test", "v1=deadbeef", payload, 1_700_000_000),
            Err(SignatureError::Malformed)
        );
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::catalog::{Component, ComponentCategory, QuoteItem};
    use crate::domain::job::JobStatus;
    use crate::domain::notification::{EmailNotification, NotificationStatus};
    use crate::domain::job::ScheduleToken;
    use crate::domain::team::Team;
    use crate::repository::mock::MockRepository;

    fn sample_lead(id: i32) -> Lead {
        let now = Utc::now().naive_utc();
        Lead {
            id,
            name: "Jane Citizen".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            address: Some("1 Solar St".to_string()),
            suburb: Some("Parramatta".to_string()),
            state: Some("NSW".to_string()),
            postcode: Some("2150".to_string()),
            lat: None,
            lng: None,
            system_size_kw: Some(6.6),
            panel_count: Some(15),
            quoted_price_cents: Some(550_000),
            status: LeadStatus::Accepted,
            source: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_job(id: i32, lead_id: i32, team_id: Option<i32>) -> InstallationJob {
        let now = Utc::now().naive_utc();
        InstallationJob {
            id,
            job_number: "J20260806-001".to_string(),
            lead_id,
            team_id,
            status: JobStatus::Pending,
            scheduled_on: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_team(id: i32, suburb: &str) -> Team {
        Team {
            id,
            name: "West Crew".to_string(),
            suburbs: vec![suburb.to_string()],
            service_area: vec![],
            active: true,
        }
    }

    fn sample_event(lead_id: i32) -> CheckoutEvent {
        CheckoutEvent {
            session_id: "cs_test_1".to_string(),
            lead_id,
            amount_cents: 550_000,
            customer_email: None,
        }
    }

    fn sample_ctx() -> CheckoutContext {
        CheckoutContext {
            today: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            base_url: "https://ops.example.com".to_string(),
            token_ttl_days: 14,
        }
    }

    fn sample_token(job_id: i32) -> ScheduleToken {
        ScheduleToken {
            id: 1,
            job_id,
            token: "token".to_string(),
            expires_at: Utc::now().naive_utc(),
            used_at: None,
        }
    }

    fn sample_notification() -> EmailNotification {
        EmailNotification {
            id: 1,
            recipient: "jane@example.com".to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
            status: NotificationStatus::Pending,
            attempts: 0,
            last_error: None,
            created_at: Utc::now().naive_utc(),
            sent_at: None,
        }
    }

    #[test]
    fn duplicate_delivery_short_circuits() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(sample_lead(id))));
        repo.expect_get_job_by_lead_id()
            .with(eq(7))
            .returning(|lead_id| Ok(Some(sample_job(3, lead_id, None))));
        repo.expect_set_lead_status().times(0);
        repo.expect_create_job().times(0);

        let outcome = process_checkout(&repo, &sample_event(7), &sample_ctx()).unwrap();
        assert!(matches!(outcome, CheckoutOutcome::AlreadyProcessed));
    }

    #[test]
    fn unknown_lead_is_acknowledged_without_writes() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id().returning(|_| Ok(None));
        repo.expect_set_lead_status().times(0);
        repo.expect_create_job().times(0);

        let outcome = process_checkout(&repo, &sample_event(99), &sample_ctx()).unwrap();
        assert!(matches!(outcome, CheckoutOutcome::UnknownLead));
    }

    #[test]
    fn unmatched_team_creates_unassigned_job() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|id| Ok(Some(sample_lead(id))));
        repo.expect_get_job_by_lead_id().returning(|_| Ok(None));
        repo.expect_set_lead_status()
            .with(eq(7), eq(LeadStatus::Paid))
            .returning(|id, _| {
                let mut lead = sample_lead(id);
                lead.status = LeadStatus::Paid;
                Ok(lead)
            });
        repo.expect_create_lead_event().returning(|event| {
            Ok(crate::domain::lead_event::LeadEvent {
                id: 1,
                lead_id: event.lead_id,
                author_email: event.author_email.clone(),
                event_type: event.event_type.clone(),
                event_data: event.event_data.clone(),
                created_at: Utc::now().naive_utc(),
            })
        });
        repo.expect_latest_job_number_with_prefix()
            .returning(|_| Ok(None));
        // Active teams exist, but none serve the lead's suburb.
        repo.expect_list_teams()
            .returning(|_| Ok(vec![sample_team(1, "Newcastle")]));
        repo.expect_create_job()
            .withf(|new_job| {
                new_job.team_id.is_none() && new_job.job_number.as_str() == "J20260806-001"
            })
            .returning(|new_job| Ok(sample_job(3, new_job.lead_id, new_job.team_id)));
        repo.expect_list_quote_items().returning(|_| Ok(vec![]));
        repo.expect_create_schedule_token()
            .returning(|token| Ok(sample_token(token.job_id)));
        repo.expect_enqueue_notification()
            .returning(|_| Ok(sample_notification()));

        let outcome = process_checkout(&repo, &sample_event(7), &sample_ctx()).unwrap();
        match outcome {
            CheckoutOutcome::Created { job, orders_created } => {
                assert_eq!(job.team_id, None);
                assert_eq!(orders_created, 0);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn order_failure_does_not_fail_the_checkout() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|id| Ok(Some(sample_lead(id))));
        repo.expect_get_job_by_lead_id().returning(|_| Ok(None));
        repo.expect_set_lead_status().returning(|id, _| {
            let mut lead = sample_lead(id);
            lead.status = LeadStatus::Paid;
            Ok(lead)
        });
        repo.expect_create_lead_event().returning(|event| {
            Ok(crate::domain::lead_event::LeadEvent {
                id: 1,
                lead_id: event.lead_id,
                author_email: event.author_email.clone(),
                event_type: event.event_type.clone(),
                event_data: event.event_data.clone(),
                created_at: Utc::now().naive_utc(),
            })
        });
        repo.expect_latest_job_number_with_prefix()
            .returning(|_| Ok(Some("J20260806-002".to_string())));
        repo.expect_list_teams()
            .returning(|_| Ok(vec![sample_team(4, "Parramatta")]));
        repo.expect_create_job()
            .withf(|new_job| {
                new_job.team_id == Some(4) && new_job.job_number.as_str() == "J20260806-003"
            })
            .returning(|new_job| {
                let mut job = sample_job(3, new_job.lead_id, new_job.team_id);
                job.job_number = new_job.job_number.as_str().to_string();
                Ok(job)
            });
        repo.expect_list_quote_items().returning(|_| {
            Ok(vec![(
                QuoteItem {
                    lead_id: 7,
                    component_id: 10,
                    quantity: 15,
                },
                Component {
                    id: 10,
                    supplier_id: 2,
                    sku: "PNL-440".to_string(),
                    name: "440W Panel".to_string(),
                    category: ComponentCategory::Panel,
                    unit_price_cents: 25_000,
                    stock_on_hand: 40,
                },
            )])
        });
        repo.expect_create_order().returning(|_, _| {
            Err(RepositoryError::DatabaseError("disk full".to_string()))
        });
        repo.expect_create_schedule_token()
            .returning(|token| Ok(sample_token(token.job_id)));
        repo.expect_enqueue_notification()
            .withf(|n| n.recipient.as_str() == "jane@example.com")
            .returning(|_| Ok(sample_notification()));

        let outcome = process_checkout(&repo, &sample_event(7), &sample_ctx()).unwrap();
        match outcome {
            CheckoutOutcome::Created { orders_created, .. } => assert_eq!(orders_created, 0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn insert_race_is_treated_as_duplicate() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|id| Ok(Some(sample_lead(id))));
        repo.expect_get_job_by_lead_id().returning(|_| Ok(None));
        repo.expect_set_lead_status().returning(|id, _| {
            let mut lead = sample_lead(id);
            lead.status = LeadStatus::Paid;
            Ok(lead)
        });
        repo.expect_create_lead_event().returning(|event| {
            Ok(crate::domain::lead_event::LeadEvent {
                id: 1,
                lead_id: event.lead_id,
                author_email: event.author_email.clone(),
                event_type: event.event_type.clone(),
                event_data: event.event_data.clone(),
                created_at: Utc::now().naive_utc(),
            })
        });
        repo.expect_latest_job_number_with_prefix()
            .returning(|_| Ok(None));
        repo.expect_list_teams().returning(|_| Ok(vec![]));
        repo.expect_create_job().returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "UNIQUE constraint failed: installation_jobs.lead_id".to_string(),
            ))
        });
        repo.expect_create_order().times(0);
        repo.expect_create_schedule_token().times(0);

        let outcome = process_checkout(&repo, &sample_event(7), &sample_ctx()).unwrap();
        assert!(matches!(outcome, CheckoutOutcome::AlreadyProcessed));
    }
}
