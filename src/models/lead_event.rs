//! Diesel models for storing lead activity events.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead_event::{
    LeadEvent as DomainLeadEvent, NewLeadEvent as DomainNewLeadEvent,
};
use crate::models::lead::Lead;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(table_name = crate::schema::lead_events)]
pub struct LeadEvent {
    pub id: i32,
    pub lead_id: i32,
    pub author_email: String,
    pub event_type: String,
    pub event_data: String, // store JSON text in the DB
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_events)]
pub struct NewLeadEvent {
    pub lead_id: i32,
    pub author_email: String,
    pub event_type: String,
    pub event_data: String,
}

impl From<LeadEvent> for DomainLeadEvent {
    fn from(event: LeadEvent) -> Self {
        let event_data = serde_json::from_str(&event.event_data).unwrap_or_default();

        Self {
            id: event.id,
            lead_id: event.lead_id,
            author_email: event.author_email,
            event_type: event.event_type.into(),
            event_data,
            created_at: event.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewLeadEvent> for NewLeadEvent {
    fn from(event: &'a DomainNewLeadEvent) -> Self {
        Self {
            lead_id: event.lead_id,
            author_email: event.author_email.clone(),
            event_type: event.event_type.to_string(),
            event_data: event.event_data.to_string(),
        }
    }
}
