//! Repository implementation for leads and their quote selections.

use chrono::Utc;
use diesel::{Connection, prelude::*};

use crate::domain::catalog::{Component, NewQuoteItem, QuoteItem};
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::models::catalog::{Component as DbComponent, QuoteItem as DbQuoteItem};
use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead, UpdateLead as DbUpdateLead};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, LeadListQuery, LeadReader, LeadWriter};

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: i32) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .find(id)
            .first::<DbLead>(&mut conn)
            .optional()?;

        match lead {
            Some(lead) => Ok(Some(Lead::try_from(lead).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = leads::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(leads::status.eq(status.to_string()));
            }

            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                // `name` is NOT NULL while the contact columns are nullable,
                // so lift the whole predicate into the nullable domain.
                items = items.filter(
                    leads::name
                        .like(pattern.clone())
                        .nullable()
                        .or(leads::email.like(pattern.clone()))
                        .or(leads::phone.like(pattern.clone()))
                        .or(leads::address.like(pattern.clone()))
                        .or(leads::suburb.like(pattern)),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(leads::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let leads = items
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(|lead| Lead::try_from(lead).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, leads))
    }

    fn list_quote_items(&self, lead_id: i32) -> RepositoryResult<Vec<(QuoteItem, Component)>> {
        use crate::schema::{components, quote_items};

        let mut conn = self.conn()?;
        let rows = quote_items::table
            .inner_join(components::table)
            .filter(quote_items::lead_id.eq(lead_id))
            .select((quote_items::all_columns, components::all_columns))
            .load::<(DbQuoteItem, DbComponent)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(item, component)| (item.into(), component.into()))
            .collect())
    }
}

impl LeadWriter for DieselRepository {
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewLead> = new_leads.iter().map(Into::into).collect();
        let affected = diesel::insert_into(leads::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_lead(&self, lead_id: i32, updates: &UpdateLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let changeset: DbUpdateLead = updates.into();
        let lead = diesel::update(leads::table.find(lead_id))
            .set((changeset, leads::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(lead).map_err(RepositoryError::from)
    }

    fn set_lead_status(&self, lead_id: i32, status: LeadStatus) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = diesel::update(leads::table.find(lead_id))
            .set((
                leads::status.eq(status.to_string()),
                leads::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(lead).map_err(RepositoryError::from)
    }

    fn delete_lead(&self, lead_id: i32) -> RepositoryResult<()> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        diesel::delete(leads::table.find(lead_id)).execute(&mut conn)?;

        Ok(())
    }

    fn replace_quote_items(
        &self,
        lead_id: i32,
        items: &[NewQuoteItem],
    ) -> RepositoryResult<usize> {
        use crate::schema::quote_items;

        let mut conn = self.conn()?;
        let rows: Vec<DbQuoteItem> = items.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(move |conn| {
            diesel::delete(quote_items::table.filter(quote_items::lead_id.eq(lead_id)))
                .execute(conn)?;

            let result = diesel::insert_into(quote_items::table)
                .values(rows)
                .execute(conn)?;

            Ok(result)
        })
        .map_err(RepositoryError::from)
    }
}
