//! Lead CRM use cases: index listing, creation, CSV import, detail editing.

use serde_json::json;
use validator::Validate;

use crate::domain::catalog::NewQuoteItem;
use crate::domain::lead::{LeadStatus, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEventType, NewLeadEvent};
use crate::domain::types::{CommentMessage, PhoneNumber};
use crate::dto::lead::LeadPageData;
use crate::dto::main::{IndexPageData, IndexQuery};
use crate::forms::lead::{AddCommentForm, QuoteItemsForm, SaveLeadForm};
use crate::forms::main::{AddLeadForm, UploadLeadsForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    CatalogReader, DocumentReader, LeadEventListQuery, LeadEventReader, LeadEventWriter,
    LeadListQuery, LeadReader, LeadWriter,
};
use crate::routes::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads the filtered lead list for the index page.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<IndexPageData>
where
    R: LeadReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = query.page.unwrap_or(1);
    let mut list_query = LeadListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let search_query = query
        .q
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let status_filter = query
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(status) = &status_filter {
        list_query = list_query.status(status.parse::<LeadStatus>()?);
    }

    let (total, leads) = repo.list_leads(list_query)?;
    let leads = Paginated::new(leads, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE));

    Ok(IndexPageData {
        leads,
        search_query,
        status_filter,
    })
}

/// Validates the add-lead form and persists a new lead record.
pub fn add_lead<R>(repo: &R, user: &AuthenticatedUser, form: AddLeadForm) -> ServiceResult<()>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Lead form failed validation".to_string()));
    }

    let mut new_lead: NewLead = form.into();
    if let Some(phone) = new_lead.phone.take() {
        new_lead.phone = Some(PhoneNumber::new(phone)?.into_inner());
    }

    repo.create_leads(&[new_lead]).map_err(|err| {
        log::error!("Failed to add a lead: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Parses the uploaded CSV file and creates lead records in bulk.
///
/// Returns the number of created leads and the number of skipped rows.
pub fn upload_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadLeadsForm,
) -> ServiceResult<(usize, usize)>
where
    R: LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let (leads, skipped) = form.parse().map_err(|err| {
        log::error!("Failed to parse leads: {err}");
        ServiceError::Form("Could not parse the uploaded CSV".to_string())
    })?;

    let created = repo.create_leads(&leads).map_err(|err| {
        log::error!("Failed to add leads: {err}");
        ServiceError::from(err)
    })?;

    Ok((created, skipped))
}

/// Loads everything the lead detail page renders.
pub fn load_lead_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
) -> ServiceResult<LeadPageData>
where
    R: LeadReader + LeadEventReader + DocumentReader + CatalogReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let lead = repo
        .get_lead_by_id(lead_id)?
        .ok_or(ServiceError::NotFound)?;

    let quote_items = repo.list_quote_items(lead_id)?;
    let quote_total_cents = quote_items
        .iter()
        .map(|(item, component)| component.unit_price_cents * i64::from(item.quantity))
        .sum();

    let (total_events, events) = repo.list_lead_events(LeadEventListQuery::new(lead_id))?;
    let documents = repo.list_documents_for_lead(lead_id)?;
    let components = repo.list_components()?;

    Ok(LeadPageData {
        lead,
        quote_items,
        quote_total_cents,
        events,
        documents,
        components,
        total_events,
    })
}

/// Applies the save form to the lead, recording status moves as events.
pub fn save_lead<R>(repo: &R, user: &AuthenticatedUser, form: &SaveLeadForm) -> ServiceResult<()>
where
    R: LeadReader + LeadWriter + LeadEventWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Lead form failed validation".to_string()));
    }

    let existing = repo
        .get_lead_by_id(form.id)?
        .ok_or(ServiceError::NotFound)?;

    let mut updates = UpdateLead::try_from(form)?;
    if let Some(phone) = updates.phone.take() {
        updates.phone = Some(PhoneNumber::new(phone)?.into_inner());
    }

    let status_changed = existing.status != updates.status;
    let new_status = updates.status;

    repo.update_lead(form.id, &updates).map_err(|err| {
        log::error!("Failed to update lead: {err}");
        ServiceError::from(err)
    })?;

    if status_changed {
        repo.create_lead_event(&NewLeadEvent::new(
            form.id,
            &user.email,
            LeadEventType::Status,
            json!({
                "from": existing.status.to_string(),
                "to": new_status.to_string(),
            }),
        ))?;
    }

    Ok(())
}

/// Records a comment or call/email note against the lead.
pub fn comment_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddCommentForm,
) -> ServiceResult<()>
where
    R: LeadReader + LeadEventWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Comment form failed validation".to_string(),
        ));
    }

    repo.get_lead_by_id(form.id)?.ok_or(ServiceError::NotFound)?;

    let message = CommentMessage::new(form.text.as_str())?;

    repo.create_lead_event(&NewLeadEvent::new(
        form.id,
        &user.email,
        form.event_type.as_str().into(),
        json!({ "text": message.as_str() }),
    ))?;

    Ok(())
}

/// Replaces the lead's quote line selection.
pub fn save_quote_items<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<i32>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let form = QuoteItemsForm::parse(body).map_err(ServiceError::Form)?;

    repo.get_lead_by_id(form.id)?.ok_or(ServiceError::NotFound)?;

    let items = form
        .rows()
        .into_iter()
        .map(|(component_id, quantity)| NewQuoteItem {
            lead_id: form.id,
            component_id,
            quantity,
        })
        .collect::<Vec<_>>();

    repo.replace_quote_items(form.id, &items)?;

    Ok(form.id)
}
