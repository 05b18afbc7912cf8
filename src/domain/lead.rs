use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Sales-pipeline position of a lead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Accepted,
    Paid,
    Closed,
    Lost,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Quoted => "quoted",
            LeadStatus::Accepted => "accepted",
            LeadStatus::Paid => "paid",
            LeadStatus::Closed => "closed",
            LeadStatus::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

impl FromStr for LeadStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "quoted" => Ok(LeadStatus::Quoted),
            "accepted" => Ok(LeadStatus::Accepted),
            "paid" => Ok(LeadStatus::Paid),
            "closed" => Ok(LeadStatus::Closed),
            "lost" => Ok(LeadStatus::Lost),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown lead status: {other}"
            ))),
        }
    }
}

/// A prospective customer with the proposed system and quote attached.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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
    pub status: LeadStatus,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLead {
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
    pub source: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl NewLead {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        suburb: Option<String>,
        state: Option<String>,
        postcode: Option<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: trimmed(email).map(|s| s.to_lowercase()),
            phone: trimmed(phone),
            address: trimmed(address),
            suburb: trimmed(suburb),
            state: trimmed(state).map(|s| s.to_uppercase()),
            postcode: trimmed(postcode),
            lat: None,
            lng: None,
            system_size_kw: None,
            panel_count: None,
            source: trimmed(source),
        }
    }

    pub fn with_system(mut self, system_size_kw: Option<f64>, panel_count: Option<i32>) -> Self {
        self.system_size_kw = system_size_kw;
        self.panel_count = panel_count;
        self
    }

    pub fn with_coordinates(mut self, lat: Option<f64>, lng: Option<f64>) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateLead {
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
    pub status: LeadStatus,
}

impl UpdateLead {
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = trimmed(self.email).map(|s| s.to_lowercase());
        self.phone = trimmed(self.phone);
        self.address = trimmed(self.address);
        self.suburb = trimmed(self.suburb);
        self.state = trimmed(self.state).map(|s| s.to_uppercase());
        self.postcode = trimmed(self.postcode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lead_normalizes_contact_fields() {
        let lead = NewLead::new(
            " Jane Citizen ".to_string(),
            Some(" Jane@Example.com ".to_string()),
            Some("  ".to_string()),
            None,
            Some("Parramatta".to_string()),
            Some("nsw".to_string()),
            Some("2150".to_string()),
            Some("website".to_string()),
        );

        assert_eq!(lead.name, "Jane Citizen");
        assert_eq!(lead.email.as_deref(), Some("jane@example.com"));
        assert_eq!(lead.phone, None);
        assert_eq!(lead.state.as_deref(), Some("NSW"));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Quoted,
            LeadStatus::Accepted,
            LeadStatus::Paid,
            LeadStatus::Closed,
            LeadStatus::Lost,
        ] {
            assert_eq!(status.to_string().parse::<LeadStatus>().unwrap(), status);
        }
        assert!("garbage".parse::<LeadStatus>().is_err());
    }
}
