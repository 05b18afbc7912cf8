//! Repository implementation for the lead activity log.

use diesel::prelude::*;

use crate::domain::lead_event::{LeadEvent, NewLeadEvent};
use crate::models::lead_event::{LeadEvent as DbLeadEvent, NewLeadEvent as DbNewLeadEvent};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, LeadEventListQuery, LeadEventReader, LeadEventWriter};

impl LeadEventReader for DieselRepository {
    fn list_lead_events(
        &self,
        query: LeadEventListQuery,
    ) -> RepositoryResult<(usize, Vec<LeadEvent>)> {
        use crate::schema::lead_events;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = lead_events::table
                .filter(lead_events::lead_id.eq(query.lead_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(event_type) = &query.event_type {
                items = items.filter(lead_events::event_type.eq(event_type.to_string()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(lead_events::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let events = items
            .load::<DbLeadEvent>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total, events))
    }
}

impl LeadEventWriter for DieselRepository {
    fn create_lead_event(&self, event: &NewLeadEvent) -> RepositoryResult<LeadEvent> {
        use crate::schema::lead_events;

        let mut conn = self.conn()?;
        let new_event: DbNewLeadEvent = event.into();
        let created = diesel::insert_into(lead_events::table)
            .values(&new_event)
            .get_result::<DbLeadEvent>(&mut conn)?;

        Ok(created.into())
    }
}
