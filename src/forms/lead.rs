use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadStatus, UpdateLead};
use crate::domain::types::TypeConstraintError;

fn parse_optional<T: std::str::FromStr>(
    value: &Option<String>,
    label: &str,
) -> Result<Option<T>, TypeConstraintError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            TypeConstraintError::InvalidValue(format!("cannot parse {label}: {raw}"))
        }),
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing lead.
pub struct SaveLeadForm {
    /// Lead identifier.
    pub id: i32,
    /// Updated display name.
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    // Numeric inputs arrive as strings so that empty fields clear the value.
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub system_size_kw: Option<String>,
    pub panel_count: Option<String>,
    pub quoted_price_cents: Option<String>,
    pub status: String,
}

impl TryFrom<&SaveLeadForm> for UpdateLead {
    type Error = TypeConstraintError;

    fn try_from(form: &SaveLeadForm) -> Result<Self, Self::Error> {
        Ok(UpdateLead {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            suburb: form.suburb.clone(),
            state: form.state.clone(),
            postcode: form.postcode.clone(),
            lat: parse_optional(&form.lat, "latitude")?,
            lng: parse_optional(&form.lng, "longitude")?,
            system_size_kw: parse_optional(&form.system_size_kw, "system size")?,
            panel_count: parse_optional(&form.panel_count, "panel count")?,
            quoted_price_cents: parse_optional(&form.quoted_price_cents, "quoted price")?,
            status: form.status.parse::<LeadStatus>()?,
        }
        .normalized())
    }
}

#[derive(Deserialize, Validate)]
/// Form data for adding a comment or activity entry to a lead.
pub struct AddCommentForm {
    /// Identifier of the lead that receives the entry.
    pub id: i32,
    /// Comment text content.
    #[validate(length(min = 1))]
    pub text: String,
    /// Type of event associated with the comment.
    pub event_type: String,
}

/// Multi-valued quote line selection; parsed with `serde_html_form` because
/// the component and quantity inputs repeat per row.
#[derive(Debug, Deserialize)]
pub struct QuoteItemsForm {
    pub id: i32,
    #[serde(default)]
    pub component_id: Vec<i32>,
    #[serde(default)]
    pub quantity: Vec<i32>,
}

impl QuoteItemsForm {
    pub fn parse(body: &[u8]) -> Result<Self, String> {
        serde_html_form::from_bytes(body).map_err(|e| format!("cannot parse quote lines: {e}"))
    }

    /// Pairs component ids with quantities, dropping empty rows.
    pub fn rows(&self) -> Vec<(i32, i32)> {
        self.component_id
            .iter()
            .zip(self.quantity.iter())
            .filter(|(_, qty)| **qty > 0)
            .map(|(component_id, qty)| (*component_id, *qty))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_items_parse_repeated_fields() {
        let body = b"id=3&component_id=1&quantity=12&component_id=2&quantity=0&component_id=5&quantity=1";
        let form = QuoteItemsForm::parse(body).expect("parse form");
        assert_eq!(form.id, 3);
        assert_eq!(form.rows(), vec![(1, 12), (5, 1)]);
    }

    #[test]
    fn save_lead_form_rejects_bad_numbers() {
        let form = SaveLeadForm {
            id: 1,
            name: "Jane".to_string(),
            email: None,
            phone: None,
            address: None,
            suburb: None,
            state: None,
            postcode: None,
            lat: Some("not-a-number".to_string()),
            lng: None,
            system_size_kw: None,
            panel_count: None,
            quoted_price_cents: None,
            status: "new".to_string(),
        };
        assert!(UpdateLead::try_from(&form).is_err());
    }

    #[test]
    fn save_lead_form_treats_empty_numbers_as_none() {
        let form = SaveLeadForm {
            id: 1,
            name: "Jane".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            address: None,
            suburb: None,
            state: None,
            postcode: None,
            lat: Some("".to_string()),
            lng: Some(" ".to_string()),
            system_size_kw: Some("6.6".to_string()),
            panel_count: Some("15".to_string()),
            quoted_price_cents: Some("550000".to_string()),
            status: "quoted".to_string(),
        };
        let updates = UpdateLead::try_from(&form).expect("valid form");
        assert_eq!(updates.lat, None);
        assert_eq!(updates.lng, None);
        assert_eq!(updates.system_size_kw, Some(6.6));
        assert_eq!(updates.panel_count, Some(15));
        assert_eq!(updates.quoted_price_cents, Some(550_000));
        assert_eq!(updates.status, LeadStatus::Quoted);
    }
}
