use chrono::Utc;
use serde_json::json;

use solar_ops::domain::catalog::{ComponentCategory, NewComponent, NewQuoteItem, NewSupplier};
use solar_ops::domain::geo::GeoPoint;
use solar_ops::domain::hr::{ApplicationStatus, NewApplication, NewPosition, NewVacancy};
use solar_ops::domain::job::{JobStatus, NewInstallationJob, NewScheduleToken};
use solar_ops::domain::lead::{LeadStatus, NewLead, UpdateLead};
use solar_ops::domain::lead_event::{LeadEventType, NewLeadEvent};
use solar_ops::domain::notification::{NewEmailNotification, NotificationStatus};
use solar_ops::domain::order::{NewMaterialOrder, NewOrderLine, OrderStatus};
use solar_ops::domain::team::{NewTeam, NewTeamMember};
use solar_ops::domain::types::{EmailAddress, JobNumber};
use solar_ops::repository::{
    CatalogWriter, DieselRepository, HrReader, HrWriter, JobReader, JobWriter,
    LeadEventListQuery, LeadEventReader, LeadEventWriter, LeadListQuery, LeadReader, LeadWriter,
    NotificationReader, NotificationWriter, OrderListQuery, OrderReader, OrderWriter,
    ScheduleTokenReader, ScheduleTokenWriter, TeamReader, TeamWriter,
};

mod common;

fn sample_lead(name: &str, suburb: &str) -> NewLead {
    NewLead::new(
        name.to_string(),
        Some(format!("{}@example.com", name.to_lowercase())),
        Some("+61293744000".to_string()),
        Some("1 Solar St".to_string()),
        Some(suburb.to_string()),
        Some("NSW".to_string()),
        Some("2150".to_string()),
        Some("website".to_string()),
    )
    .with_system(Some(6.6), Some(15))
}

#[test]
fn test_lead_repository_crud() {
    let test_db = common::TestDb::new("test_lead_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    assert_eq!(
        repo.create_leads(&[
            sample_lead("Alice", "Parramatta"),
            sample_lead("Bob", "Blacktown")
        ])
        .unwrap(),
        2
    );

    let (total, leads) = repo.list_leads(LeadListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(leads.len(), 2);

    let (search_total, search_items) = repo
        .list_leads(LeadListQuery::new().search("Bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name, "Bob");
    let bob = search_items[0].clone();

    let updates = UpdateLead {
        name: "Bobby".to_string(),
        email: bob.email.clone(),
        phone: bob.phone.clone(),
        address: bob.address.clone(),
        suburb: bob.suburb.clone(),
        state: bob.state.clone(),
        postcode: bob.postcode.clone(),
        lat: None,
        lng: None,
        system_size_kw: Some(9.9),
        panel_count: Some(22),
        quoted_price_cents: Some(880_000),
        status: LeadStatus::Quoted,
    };
    let updated = repo.update_lead(bob.id, &updates).unwrap();
    assert_eq!(updated.name, "Bobby");
    assert_eq!(updated.status, LeadStatus::Quoted);
    assert_eq!(updated.quoted_price_cents, Some(880_000));

    let paid = repo.set_lead_status(bob.id, LeadStatus::Paid).unwrap();
    assert_eq!(paid.status, LeadStatus::Paid);

    let (status_total, status_items) = repo
        .list_leads(LeadListQuery::new().status(LeadStatus::Paid))
        .unwrap();
    assert_eq!(status_total, 1);
    assert_eq!(status_items[0].id, bob.id);

    let alice = repo
        .list_leads(LeadListQuery::new().search("Alice"))
        .unwrap()
        .1
        .remove(0);
    repo.delete_lead(alice.id).unwrap();
    assert!(repo.get_lead_by_id(alice.id).unwrap().is_none());
}

#[test]
fn test_lead_event_repository() {
    let test_db = common::TestDb::new("test_lead_event_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_leads(&[sample_lead("Alice", "Parramatta")])
        .unwrap();
    let lead = repo.list_leads(LeadListQuery::new()).unwrap().1.remove(0);

    let created = repo
        .create_lead_event(&NewLeadEvent::new(
            lead.id,
            "ops@example.com",
            LeadEventType::Comment,
            json!({"text": "called, interested"}),
        ))
        .unwrap();
    assert_eq!(created.event_type, LeadEventType::Comment);

    repo.create_lead_event(&NewLeadEvent::new(
        lead.id,
        "system",
        LeadEventType::Payment,
        json!({"amount_cents": 550_000}),
    ))
    .unwrap();

    let (total, events) = repo
        .list_lead_events(LeadEventListQuery::new(lead.id))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(events.len(), 2);

    let (comment_total, comments) = repo
        .list_lead_events(LeadEventListQuery::new(lead.id).event_type(LeadEventType::Comment))
        .unwrap();
    assert_eq!(comment_total, 1);
    assert_eq!(comments[0].event_data["text"], json!("called, interested"));
}

#[test]
fn test_job_and_token_repository() {
    let test_db = common::TestDb::new("test_job_and_token_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.create_leads(&[sample_lead("Alice", "Parramatta")])
        .unwrap();
    let lead = repo.list_leads(LeadListQuery::new()).unwrap().1.remove(0);

    let job_number = JobNumber::new("J20260806-001").unwrap();
    let job = repo
        .create_job(&NewInstallationJob::new(job_number, lead.id, None))
        .unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(repo.get_job_by_lead_id(lead.id).unwrap().unwrap().id, job.id);

    // The lead_id unique index is the idempotency backstop.
    let duplicate = repo.create_job(&NewInstallationJob::new(
        JobNumber::new("J20260806-002").unwrap(),
        lead.id,
        None,
    ));
    assert!(matches!(
        duplicate,
        Err(solar_ops::repository::errors::RepositoryError::ConstraintViolation(_))
    ));

    let latest = repo.latest_job_number_with_prefix("J20260806").unwrap();
    assert_eq!(latest.as_deref(), Some("J20260806-001"));
    assert!(
        repo.latest_job_number_with_prefix("J20990101")
            .unwrap()
            .is_none()
    );

    let token = repo
        .create_schedule_token(&NewScheduleToken::new(
            job.id,
            "tok123".to_string(),
            Utc::now().naive_utc(),
            14,
        ))
        .unwrap();
    let fetched = repo.get_schedule_token("tok123").unwrap().unwrap();
    assert_eq!(fetched.id, token.id);
    assert!(!fetched.is_used());

    repo.mark_schedule_token_used(token.id).unwrap();
    assert!(repo.get_schedule_token("tok123").unwrap().unwrap().is_used());
}

#[test]
fn test_team_repository_and_member_lookup() {
    let test_db = common::TestDb::new("test_team_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let team = repo
        .create_team(&NewTeam::new(
            "West Crew".to_string(),
            vec!["Parramatta".to_string(), "Blacktown".to_string()],
            vec![
                GeoPoint::new(-34.0, 150.0),
                GeoPoint::new(-34.0, 151.0),
                GeoPoint::new(-33.0, 151.0),
            ],
            true,
        ))
        .unwrap();
    assert!(team.serves_suburb("parramatta"));

    repo.replace_team_members(
        team.id,
        &[NewTeamMember::new(
            team.id,
            "Sam Rivers".to_string(),
            "Sam@Example.com".to_string(),
        )],
    )
    .unwrap();

    let members = repo.list_team_members(team.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].email, "sam@example.com");

    let found = repo.find_team_for_member("sam@example.com").unwrap();
    assert_eq!(found.map(|t| t.id), Some(team.id));
    assert!(repo.find_team_for_member("nobody@example.com").unwrap().is_none());

    repo.delete_team(team.id).unwrap();
    assert!(repo.get_team_by_id(team.id).unwrap().is_none());
}

#[test]
fn test_catalog_and_order_repository() {
    let test_db = common::TestDb::new("test_catalog_and_order_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let supplier = repo
        .create_supplier(&NewSupplier::new(
            "SunParts".to_string(),
            "orders@sunparts.example".to_string(),
            true,
        ))
        .unwrap();

    let panel = repo
        .create_component(&NewComponent::new(
            supplier.id,
            "pnl-440".to_string(),
            "440W Panel".to_string(),
            ComponentCategory::Panel,
            25_000,
            40,
        ))
        .unwrap();
    assert_eq!(panel.sku, "PNL-440");

    repo.create_leads(&[sample_lead("Alice", "Parramatta")])
        .unwrap();
    let lead = repo.list_leads(LeadListQuery::new()).unwrap().1.remove(0);

    repo.replace_quote_items(
        lead.id,
        &[NewQuoteItem {
            lead_id: lead.id,
            component_id: panel.id,
            quantity: 15,
        }],
    )
    .unwrap();
    let items = repo.list_quote_items(lead.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0.quantity, 15);
    assert_eq!(items[0].1.id, panel.id);

    let job = repo
        .create_job(&NewInstallationJob::new(
            JobNumber::new("J20260806-001").unwrap(),
            lead.id,
            None,
        ))
        .unwrap();

    let order = repo
        .create_order(
            &NewMaterialOrder {
                order_number: format!("PO-{}-1", job.job_number),
                job_id: job.id,
                supplier_id: supplier.id,
            },
            &[NewOrderLine {
                component_id: panel.id,
                quantity: 15,
                unit_price_cents: 25_000,
            }],
        )
        .unwrap();
    assert_eq!(order.status, OrderStatus::Draft);

    let (fetched, lines) = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(fetched.order_number, order.order_number);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 15);

    let for_job = repo.list_orders_for_job(job.id).unwrap();
    assert_eq!(for_job.len(), 1);

    let (total, listed) = repo
        .list_orders(OrderListQuery::new().status(OrderStatus::Draft))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(listed[0].1.name, "SunParts");

    repo.set_order_status(order.id, OrderStatus::Sent).unwrap();
    let (after, _) = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(after.status, OrderStatus::Sent);

    let restocked = repo.adjust_component_stock(panel.id, 15).unwrap();
    assert_eq!(restocked.stock_on_hand, 55);
}

#[test]
fn test_hr_repository() {
    let test_db = common::TestDb::new("test_hr_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let position = repo
        .create_position(&NewPosition::new(
            "Installer".to_string(),
            Some("Roof work".to_string()),
            true,
        ))
        .unwrap();

    let vacancy = repo
        .create_vacancy(&NewVacancy {
            position_id: position.id,
            headcount: 2,
            opened_on: Utc::now().date_naive(),
            closes_on: None,
        })
        .unwrap();

    let vacancies = repo.list_vacancies().unwrap();
    assert_eq!(vacancies.len(), 1);
    assert_eq!(vacancies[0].1.title, "Installer");

    let application = repo
        .create_application(&NewApplication::new(
            vacancy.id,
            "Casey".to_string(),
            Some("casey@example.com".to_string()),
            None,
        ))
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Received);

    let advanced = repo
        .set_application_status(application.id, ApplicationStatus::Interview)
        .unwrap();
    assert_eq!(advanced.status, ApplicationStatus::Interview);
}

#[test]
fn test_outbox_lifecycle() {
    let test_db = common::TestDb::new("test_outbox_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let first = repo
        .enqueue_notification(&NewEmailNotification::new(
            EmailAddress::new("jane@example.com").unwrap(),
            "Book your installation".to_string(),
            "body".to_string(),
        ))
        .unwrap();
    let second = repo
        .enqueue_notification(&NewEmailNotification::new(
            EmailAddress::new("orders@sunparts.example").unwrap(),
            "Purchase order".to_string(),
            "body".to_string(),
        ))
        .unwrap();

    assert_eq!(repo.list_pending_notifications(10).unwrap().len(), 2);

    repo.mark_notification_sent(first.id).unwrap();
    repo.mark_notification_failed(second.id, "relay timed out")
        .unwrap();

    // Neither the sent nor the failed row stays pending.
    let pending = repo.list_pending_notifications(10).unwrap();
    assert!(pending.is_empty());

    assert_eq!(first.status, NotificationStatus::Pending);
    assert_eq!(first.attempts, 0);
    assert_eq!(second.recipient, "orders@sunparts.example");
}
