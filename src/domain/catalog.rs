use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A component supplier orders are distributed to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub active: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl NewSupplier {
    pub fn new(name: String, email: String, active: bool) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            active,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ComponentCategory {
    Panel,
    Inverter,
    Battery,
    Mounting,
    Electrical,
    Other(String),
}

impl Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentCategory::Panel => write!(f, "Panel"),
            ComponentCategory::Inverter => write!(f, "Inverter"),
            ComponentCategory::Battery => write!(f, "Battery"),
            ComponentCategory::Mounting => write!(f, "Mounting"),
            ComponentCategory::Electrical => write!(f, "Electrical"),
            ComponentCategory::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ComponentCategory {
    fn from(s: &str) -> Self {
        match s {
            "Panel" => ComponentCategory::Panel,
            "Inverter" => ComponentCategory::Inverter,
            "Battery" => ComponentCategory::Battery,
            "Mounting" => ComponentCategory::Mounting,
            "Electrical" => ComponentCategory::Electrical,
            _ => ComponentCategory::Other(s.to_string()),
        }
    }
}

impl From<String> for ComponentCategory {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// A purchasable installation component tracked as inventory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub id: i32,
    pub supplier_id: i32,
    pub sku: String,
    pub name: String,
    pub category: ComponentCategory,
    pub unit_price_cents: i64,
    pub stock_on_hand: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewComponent {
    pub supplier_id: i32,
    pub sku: String,
    pub name: String,
    pub category: ComponentCategory,
    pub unit_price_cents: i64,
    pub stock_on_hand: i32,
}

impl NewComponent {
    pub fn new(
        supplier_id: i32,
        sku: String,
        name: String,
        category: ComponentCategory,
        unit_price_cents: i64,
        stock_on_hand: i32,
    ) -> Self {
        Self {
            supplier_id,
            sku: sku.trim().to_uppercase(),
            name: name.trim().to_string(),
            category,
            unit_price_cents,
            stock_on_hand,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateComponent {
    pub supplier_id: i32,
    pub name: String,
    pub category: ComponentCategory,
    pub unit_price_cents: i64,
}

/// A component line selected on a lead's quote.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuoteItem {
    pub lead_id: i32,
    pub component_id: i32,
    pub quantity: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewQuoteItem {
    pub lead_id: i32,
    pub component_id: i32,
    pub quantity: i32,
}
