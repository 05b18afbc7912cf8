use serde::Deserialize;
use validator::Validate;

use crate::domain::catalog::{NewComponent, NewSupplier, UpdateComponent};
use crate::domain::types::TypeConstraintError;

fn parse_required<T: std::str::FromStr>(raw: &str, label: &str) -> Result<T, TypeConstraintError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| TypeConstraintError::InvalidValue(format!("cannot parse {label}: {raw}")))
}

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a supplier.
pub struct SupplierForm {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub active: Option<String>,
}

impl SupplierForm {
    pub fn supplier_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
    }
}

impl From<&SupplierForm> for NewSupplier {
    fn from(form: &SupplierForm) -> Self {
        NewSupplier::new(form.name.clone(), form.email.clone(), form.active.is_some())
    }
}

#[derive(Deserialize, Validate)]
/// Form data for creating or editing an inventory component.
pub struct ComponentForm {
    pub id: Option<String>,
    pub supplier_id: i32,
    #[validate(length(min = 1))]
    pub sku: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub category: String,
    pub unit_price_cents: String,
    pub stock_on_hand: Option<String>,
}

impl ComponentForm {
    pub fn component_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
    }

    pub fn to_new_component(&self) -> Result<NewComponent, TypeConstraintError> {
        let stock = match self.stock_on_hand.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => parse_required::<i32>(raw, "stock on hand")?,
        };

        Ok(NewComponent::new(
            self.supplier_id,
            self.sku.clone(),
            self.name.clone(),
            self.category.as_str().into(),
            parse_required::<i64>(&self.unit_price_cents, "unit price")?,
            stock,
        ))
    }

    pub fn to_update_component(&self) -> Result<UpdateComponent, TypeConstraintError> {
        Ok(UpdateComponent {
            supplier_id: self.supplier_id,
            name: self.name.trim().to_string(),
            category: self.category.as_str().into(),
            unit_price_cents: parse_required::<i64>(&self.unit_price_cents, "unit price")?,
        })
    }
}

#[derive(Deserialize)]
/// Stock take adjustment for one component.
pub struct StockAdjustForm {
    pub id: i32,
    pub delta: String,
}

impl StockAdjustForm {
    pub fn parsed_delta(&self) -> Result<i32, TypeConstraintError> {
        parse_required::<i32>(&self.delta, "stock adjustment")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ComponentCategory;

    #[test]
    fn component_form_parses_numbers_and_category() {
        let form = ComponentForm {
            id: None,
            supplier_id: 2,
            sku: "pnl-440".to_string(),
            name: "440W Panel".to_string(),
            category: "Panel".to_string(),
            unit_price_cents: "25000".to_string(),
            stock_on_hand: Some("40".to_string()),
        };
        let component = form.to_new_component().expect("valid component");
        assert_eq!(component.sku, "PNL-440");
        assert_eq!(component.category, ComponentCategory::Panel);
        assert_eq!(component.unit_price_cents, 25_000);
        assert_eq!(component.stock_on_hand, 40);
    }

    #[test]
    fn bad_price_is_rejected() {
        let form = ComponentForm {
            id: None,
            supplier_id: 2,
            sku: "X".to_string(),
            name: "X".to_string(),
            category: "Panel".to_string(),
            unit_price_cents: "twelve".to_string(),
            stock_on_hand: None,
        };
        assert!(form.to_new_component().is_err());
    }
}
