//! Diesel models for suppliers, components, and quote selections.

use diesel::prelude::*;

use crate::domain::catalog::{
    Component as DomainComponent, NewComponent as DomainNewComponent,
    NewQuoteItem as DomainNewQuoteItem, NewSupplier as DomainNewSupplier,
    QuoteItem as DomainQuoteItem, Supplier as DomainSupplier,
    UpdateComponent as DomainUpdateComponent,
};
use crate::models::lead::Lead;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::suppliers)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub active: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::suppliers)]
pub struct NewSupplier<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub active: bool,
}

impl From<Supplier> for DomainSupplier {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            email: supplier.email,
            active: supplier.active,
        }
    }
}

impl<'a> From<&'a DomainNewSupplier> for NewSupplier<'a> {
    fn from(supplier: &'a DomainNewSupplier) -> Self {
        Self {
            name: supplier.name.as_str(),
            email: supplier.email.as_str(),
            active: supplier.active,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Supplier, foreign_key = supplier_id))]
#[diesel(table_name = crate::schema::components)]
pub struct Component {
    pub id: i32,
    pub supplier_id: i32,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub unit_price_cents: i64,
    pub stock_on_hand: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::components)]
pub struct NewComponent<'a> {
    pub supplier_id: i32,
    pub sku: &'a str,
    pub name: &'a str,
    pub category: String,
    pub unit_price_cents: i64,
    pub stock_on_hand: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::components)]
pub struct UpdateComponent<'a> {
    pub supplier_id: i32,
    pub name: &'a str,
    pub category: String,
    pub unit_price_cents: i64,
}

impl From<Component> for DomainComponent {
    fn from(component: Component) -> Self {
        Self {
            id: component.id,
            supplier_id: component.supplier_id,
            sku: component.sku,
            name: component.name,
            category: component.category.into(),
            unit_price_cents: component.unit_price_cents,
            stock_on_hand: component.stock_on_hand,
        }
    }
}

impl<'a> From<&'a DomainNewComponent> for NewComponent<'a> {
    fn from(component: &'a DomainNewComponent) -> Self {
        Self {
            supplier_id: component.supplier_id,
            sku: component.sku.as_str(),
            name: component.name.as_str(),
            category: component.category.to_string(),
            unit_price_cents: component.unit_price_cents,
            stock_on_hand: component.stock_on_hand,
        }
    }
}

impl<'a> From<&'a DomainUpdateComponent> for UpdateComponent<'a> {
    fn from(component: &'a DomainUpdateComponent) -> Self {
        Self {
            supplier_id: component.supplier_id,
            name: component.name.as_str(),
            category: component.category.to_string(),
            unit_price_cents: component.unit_price_cents,
        }
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Insertable)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(belongs_to(Component, foreign_key = component_id))]
#[diesel(primary_key(lead_id, component_id))]
#[diesel(table_name = crate::schema::quote_items)]
pub struct QuoteItem {
    pub lead_id: i32,
    pub component_id: i32,
    pub quantity: i32,
}

impl From<QuoteItem> for DomainQuoteItem {
    fn from(item: QuoteItem) -> Self {
        Self {
            lead_id: item.lead_id,
            component_id: item.component_id,
            quantity: item.quantity,
        }
    }
}

impl From<&DomainNewQuoteItem> for QuoteItem {
    fn from(item: &DomainNewQuoteItem) -> Self {
        Self {
            lead_id: item.lead_id,
            component_id: item.component_id,
            quantity: item.quantity,
        }
    }
}
