//! Document generation: quotes, CEC compliance declarations, handover packs,
//! and purchase orders, rendered through Tera and stored as HTML.

use serde_json::json;
use tera::{Context, Tera};

use crate::domain::catalog::{Component, Supplier};
use crate::domain::document::{Document, DocumentKind, NewDocument};
use crate::domain::job::InstallationJob;
use crate::domain::lead::Lead;
use crate::domain::lead_event::{LeadEventType, NewLeadEvent};
use crate::domain::order::{MaterialOrder, OrderLine, order_total_cents};
use crate::domain::types::PublicId;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    DocumentReader, DocumentWriter, JobReader, LeadEventWriter, LeadReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::SERVICE_ACCESS_ROLE;

fn render(tera: &Tera, template: &str, context: &Context) -> ServiceResult<String> {
    tera.render(template, context).map_err(|err| {
        log::error!("Failed to render document template {template}: {err}");
        ServiceError::Template(err.to_string())
    })
}

fn dollars(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

/// Renders and stores the customer quote for a lead.
pub fn generate_quote<R>(
    repo: &R,
    tera: &Tera,
    user: &AuthenticatedUser,
    lead_id: i32,
) -> ServiceResult<Document>
where
    R: LeadReader + DocumentWriter + LeadEventWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let lead = repo
        .get_lead_by_id(lead_id)?
        .ok_or(ServiceError::NotFound)?;
    let quote_items = repo.list_quote_items(lead_id)?;

    let total_cents: i64 = quote_items
        .iter()
        .map(|(item, component)| component.unit_price_cents * i64::from(item.quantity))
        .sum();

    let mut context = Context::new();
    context.insert("lead", &lead);
    context.insert("items", &quote_items);
    context.insert("total", &dollars(total_cents));

    let body_html = render(tera, "documents/quote.html", &context)?;
    let title = format!("Quote — {}", lead.name);

    let document = repo.create_document(&NewDocument::for_lead(
        lead.id,
        DocumentKind::Quote,
        title,
        body_html,
    ))?;

    record_document_event(repo, lead.id, &user.email, &document)?;

    Ok(document)
}

/// Renders and stores the CEC/STC compliance declaration for a job.
pub fn generate_compliance<R>(
    repo: &R,
    tera: &Tera,
    user: &AuthenticatedUser,
    job_id: i32,
) -> ServiceResult<Document>
where
    R: JobReader + LeadReader + DocumentWriter + LeadEventWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (job, lead) = load_job_and_lead(repo, job_id)?;

    let mut context = Context::new();
    context.insert("job", &job);
    context.insert("lead", &lead);

    let body_html = render(tera, "documents/compliance.html", &context)?;
    let title = format!("Compliance declaration — {}", job.job_number);

    let document = repo.create_document(&NewDocument::for_job(
        job.id,
        DocumentKind::Compliance,
        title,
        body_html,
    ))?;

    record_document_event(repo, lead.id, &user.email, &document)?;

    Ok(document)
}

/// Renders and stores the customer handover pack for a completed job.
pub fn generate_handover<R>(
    repo: &R,
    tera: &Tera,
    user: &AuthenticatedUser,
    job_id: i32,
) -> ServiceResult<Document>
where
    R: JobReader + LeadReader + DocumentWriter + LeadEventWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (job, lead) = load_job_and_lead(repo, job_id)?;

    let mut context = Context::new();
    context.insert("job", &job);
    context.insert("lead", &lead);

    let body_html = render(tera, "documents/handover.html", &context)?;
    let title = format!("Handover pack — {}", job.job_number);

    let document = repo.create_document(&NewDocument::for_job(
        job.id,
        DocumentKind::Handover,
        title,
        body_html,
    ))?;

    record_document_event(repo, lead.id, &user.email, &document)?;

    Ok(document)
}

/// Renders and stores the purchase-order document sent to a supplier.
pub fn generate_purchase_order<R>(
    repo: &R,
    tera: &Tera,
    order: &MaterialOrder,
    supplier: &Supplier,
    job: &InstallationJob,
    lines: &[(OrderLine, Component)],
) -> ServiceResult<Document>
where
    R: DocumentWriter + ?Sized,
{
    let totals: Vec<OrderLine> = lines.iter().map(|(line, _)| line.clone()).collect();

    let mut context = Context::new();
    context.insert("order", order);
    context.insert("supplier", supplier);
    context.insert("job", job);
    context.insert("lines", lines);
    context.insert("total", &dollars(order_total_cents(&totals)));

    let body_html = render(tera, "documents/purchase_order.html", &context)?;
    let title = format!("Purchase order {}", order.order_number);

    let document = repo.create_document(&NewDocument::for_job(
        order.job_id,
        DocumentKind::PurchaseOrder,
        title,
        body_html,
    ))?;

    Ok(document)
}

/// Fetches a stored document by its public id.
pub fn get_document<R>(
    repo: &R,
    user: &AuthenticatedUser,
    public_id: &PublicId,
) -> ServiceResult<Document>
where
    R: DocumentReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_document_by_public_id(public_id)?
        .ok_or(ServiceError::NotFound)
}

fn load_job_and_lead<R>(repo: &R, job_id: i32) -> ServiceResult<(InstallationJob, Lead)>
where
    R: JobReader + LeadReader + ?Sized,
{
    let job = repo.get_job_by_id(job_id)?.ok_or(ServiceError::NotFound)?;
    let lead = repo
        .get_lead_by_id(job.lead_id)?
        .ok_or(ServiceError::NotFound)?;
    Ok((job, lead))
}

fn record_document_event<R>(
    repo: &R,
    lead_id: i32,
    author_email: &str,
    document: &Document,
) -> ServiceResult<()>
where
    R: LeadEventWriter + ?Sized,
{
    repo.create_lead_event(&NewLeadEvent::new(
        lead_id,
        author_email,
        LeadEventType::Document,
        json!({
            "title": document.title,
            "public_id": document.public_id.to_string(),
        }),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_formats_cents() {
        assert_eq!(dollars(550_000), "5500.00");
        assert_eq!(dollars(99), "0.99");
        assert_eq!(dollars(0), "0.00");
    }
}
