use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, LeadStatus, NewLead as DomainNewLead, UpdateLead as DomainUpdateLead,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub system_size_kw: Option<f64>,
    pub panel_count: Option<i32>,
    pub quoted_price_cents: Option<i64>,
    pub status: String,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub suburb: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postcode: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub system_size_kw: Option<f64>,
    pub panel_count: Option<i32>,
    pub source: Option<&'a str>,
    pub status: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
/// Data used when updating a [`Lead`] record.
pub struct UpdateLead<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub suburb: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postcode: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub system_size_kw: Option<f64>,
    pub panel_count: Option<i32>,
    pub quoted_price_cents: Option<i64>,
    pub status: String,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: lead.id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            address: lead.address,
            suburb: lead.suburb,
            state: lead.state,
            postcode: lead.postcode,
            lat: lead.lat,
            lng: lead.lng,
            system_size_kw: lead.system_size_kw,
            panel_count: lead.panel_count,
            quoted_price_cents: lead.quoted_price_cents,
            status: lead.status.parse::<LeadStatus>()?,
            source: lead.source,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            name: lead.name.as_str(),
            email: lead.email.as_deref(),
            phone: lead.phone.as_deref(),
            address: lead.address.as_deref(),
            suburb: lead.suburb.as_deref(),
            state: lead.state.as_deref(),
            postcode: lead.postcode.as_deref(),
            lat: lead.lat,
            lng: lead.lng,
            system_size_kw: lead.system_size_kw,
            panel_count: lead.panel_count,
            source: lead.source.as_deref(),
            status: LeadStatus::New.to_string(),
        }
    }
}

impl<'a> From<&'a DomainUpdateLead> for UpdateLead<'a> {
    fn from(lead: &'a DomainUpdateLead) -> Self {
        Self {
            name: lead.name.as_str(),
            email: lead.email.as_deref(),
            phone: lead.phone.as_deref(),
            address: lead.address.as_deref(),
            suburb: lead.suburb.as_deref(),
            state: lead.state.as_deref(),
            postcode: lead.postcode.as_deref(),
            lat: lead.lat,
            lng: lead.lng,
            system_size_kw: lead.system_size_kw,
            panel_count: lead.panel_count,
            quoted_price_cents: lead.quoted_price_cents,
            status: lead.status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn lead_into_domain_parses_status() {
        let now = Utc::now().naive_utc();
        let db_lead = Lead {
            id: 1,
            name: "Jane".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            address: None,
            suburb: Some("Penrith".to_string()),
            state: Some("NSW".to_string()),
            postcode: Some("2750".to_string()),
            lat: None,
            lng: None,
            system_size_kw: Some(6.6),
            panel_count: Some(15),
            quoted_price_cents: Some(550_000),
            status: "quoted".to_string(),
            source: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainLead::try_from(db_lead).expect("valid lead");
        assert_eq!(domain.status, LeadStatus::Quoted);
        assert_eq!(domain.suburb.as_deref(), Some("Penrith"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let now = Utc::now().naive_utc();
        let db_lead = Lead {
            id: 1,
            name: "Jane".to_string(),
            email: None,
            phone: None,
            address: None,
            suburb: None,
            state: None,
            postcode: None,
            lat: None,
            lng: None,
            system_size_kw: None,
            panel_count: None,
            quoted_price_cents: None,
            status: "mystery".to_string(),
            source: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainLead::try_from(db_lead).is_err());
    }
}
