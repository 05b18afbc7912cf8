//! DTOs shaped for the lead detail template.

use crate::domain::catalog::{Component, QuoteItem, Supplier};
use crate::domain::document::Document;
use crate::domain::lead::Lead;
use crate::domain::lead_event::LeadEvent;

/// Aggregated data required to render the lead detail page.
pub struct LeadPageData {
    pub lead: Lead,
    pub quote_items: Vec<(QuoteItem, Component)>,
    pub quote_total_cents: i64,
    pub events: Vec<LeadEvent>,
    pub documents: Vec<Document>,
    /// Full catalog, for the quote line selector.
    pub components: Vec<(Component, Supplier)>,
    pub total_events: usize,
}
