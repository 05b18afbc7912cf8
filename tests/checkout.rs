//! End-to-end checkout processing against a real database.

use chrono::Utc;

use solar_ops::domain::catalog::{ComponentCategory, NewComponent, NewQuoteItem, NewSupplier};
use solar_ops::domain::job::JobStatus;
use solar_ops::domain::lead::{LeadStatus, NewLead};
use solar_ops::domain::lead_event::LeadEventType;
use solar_ops::domain::team::NewTeam;
use solar_ops::repository::{
    CatalogWriter, DieselRepository, JobReader, LeadEventListQuery, LeadEventReader,
    LeadListQuery, LeadReader, LeadWriter, NotificationReader, OrderReader, TeamWriter,
};
use solar_ops::services::checkout::{
    CheckoutContext, CheckoutEvent, CheckoutOutcome, process_checkout,
};

mod common;

fn setup(repo: &DieselRepository) -> i32 {
    let sun_parts = repo
        .create_supplier(&NewSupplier::new(
            "SunParts".to_string(),
            "orders@sunparts.example".to_string(),
            true,
        ))
        .unwrap();
    let volt_co = repo
        .create_supplier(&NewSupplier::new(
            "VoltCo".to_string(),
            "sales@voltco.example".to_string(),
            true,
        ))
        .unwrap();

    let panel = repo
        .create_component(&NewComponent::new(
            sun_parts.id,
            "PNL-440".to_string(),
            "440W Panel".to_string(),
            ComponentCategory::Panel,
            25_000,
            100,
        ))
        .unwrap();
    let inverter = repo
        .create_component(&NewComponent::new(
            volt_co.id,
            "INV-5K".to_string(),
            "5kW Inverter".to_string(),
            ComponentCategory::Inverter,
            180_000,
            10,
        ))
        .unwrap();

    repo.create_team(&NewTeam::new(
        "West Crew".to_string(),
        vec!["Parramatta".to_string()],
        vec![],
        true,
    ))
    .unwrap();

    repo.create_leads(&[NewLead::new(
        "Jane Citizen".to_string(),
        Some("jane@example.com".to_string()),
        None,
        Some("1 Solar St".to_string()),
        Some("Parramatta".to_string()),
        Some("NSW".to_string()),
        Some("2150".to_string()),
        None,
    )
    .with_system(Some(6.6), Some(15))])
        .unwrap();
    let lead = repo.list_leads(LeadListQuery::new()).unwrap().1.remove(0);

    repo.replace_quote_items(
        lead.id,
        &[
            NewQuoteItem {
                lead_id: lead.id,
                component_id: panel.id,
                quantity: 15,
            },
            NewQuoteItem {
                lead_id: lead.id,
                component_id: inverter.id,
                quantity: 1,
            },
        ],
    )
    .unwrap();

    lead.id
}

fn ctx() -> CheckoutContext {
    CheckoutContext {
        today: Utc::now().date_naive(),
        base_url: "https://ops.example.com".to_string(),
        token_ttl_days: 14,
    }
}

#[test]
fn test_checkout_creates_job_orders_and_invitation() {
    let test_db = common::TestDb::new("test_checkout_full_flow.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let lead_id = setup(&repo);

    let event = CheckoutEvent {
        session_id: "cs_test_1".to_string(),
        lead_id,
        amount_cents: 550_000,
        customer_email: None,
    };

    let outcome = process_checkout(&repo, &event, &ctx()).unwrap();
    let job = match outcome {
        CheckoutOutcome::Created { job, orders_created } => {
            assert_eq!(orders_created, 2);
            job
        }
        other => panic!("unexpected outcome: {other:?}"),
    };

    let expected_prefix = format!("J{}", ctx().today.format("%Y%m%d"));
    assert_eq!(job.job_number, format!("{expected_prefix}-001"));
    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.team_id.is_some(), "suburb match should assign the team");

    // Lead is marked paid and the payment shows up in the activity log.
    let lead = repo.get_lead_by_id(lead_id).unwrap().unwrap();
    assert_eq!(lead.status, LeadStatus::Paid);
    let (_, payments) = repo
        .list_lead_events(LeadEventListQuery::new(lead_id).event_type(LeadEventType::Payment))
        .unwrap();
    assert_eq!(payments.len(), 1);

    // One draft order per supplier.
    let orders = repo.list_orders_for_job(job.id).unwrap();
    assert_eq!(orders.len(), 2);
    assert!(
        orders
            .iter()
            .all(|order| order.order_number.starts_with(&format!("PO-{}", job.job_number)))
    );

    // The scheduling invitation is queued with the tokenised link.
    let pending = repo.list_pending_notifications(10).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].recipient, "jane@example.com");
    assert!(pending[0].body.contains("https://ops.example.com/schedule/"));
}

#[test]
fn test_duplicate_delivery_is_idempotent() {
    let test_db = common::TestDb::new("test_checkout_duplicate.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let lead_id = setup(&repo);

    let event = CheckoutEvent {
        session_id: "cs_test_1".to_string(),
        lead_id,
        amount_cents: 550_000,
        customer_email: None,
    };

    let first = process_checkout(&repo, &event, &ctx()).unwrap();
    assert!(matches!(first, CheckoutOutcome::Created { .. }));

    let second = process_checkout(&repo, &event, &ctx()).unwrap();
    assert!(matches!(second, CheckoutOutcome::AlreadyProcessed));

    // Still exactly one job, one invitation, one set of orders.
    let job = repo.get_job_by_lead_id(lead_id).unwrap().unwrap();
    assert_eq!(repo.list_orders_for_job(job.id).unwrap().len(), 2);
    assert_eq!(repo.list_pending_notifications(10).unwrap().len(), 1);
}

#[test]
fn test_unknown_lead_is_acknowledged() {
    let test_db = common::TestDb::new("test_checkout_unknown_lead.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let event = CheckoutEvent {
        session_id: "cs_test_2".to_string(),
        lead_id: 4242,
        amount_cents: 100,
        customer_email: None,
    };

    let outcome = process_checkout(&repo, &event, &ctx()).unwrap();
    assert!(matches!(outcome, CheckoutOutcome::UnknownLead));
}
