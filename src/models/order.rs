//! Diesel models for material orders and their lines.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    MaterialOrder as DomainOrder, NewMaterialOrder as DomainNewOrder,
    NewOrderLine as DomainNewLine, OrderLine as DomainLine, OrderStatus,
};
use crate::domain::types::TypeConstraintError;
use crate::models::job::InstallationJob;
use crate::models::catalog::Supplier;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(InstallationJob, foreign_key = job_id))]
#[diesel(belongs_to(Supplier, foreign_key = supplier_id))]
#[diesel(table_name = crate::schema::material_orders)]
pub struct MaterialOrder {
    pub id: i32,
    pub order_number: String,
    pub job_id: i32,
    pub supplier_id: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::material_orders)]
pub struct NewMaterialOrder<'a> {
    pub order_number: &'a str,
    pub job_id: i32,
    pub supplier_id: i32,
    pub status: String,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(MaterialOrder, foreign_key = order_id))]
#[diesel(table_name = crate::schema::material_order_lines)]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub component_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::material_order_lines)]
pub struct NewOrderLine {
    pub order_id: i32,
    pub component_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl TryFrom<MaterialOrder> for DomainOrder {
    type Error = TypeConstraintError;

    fn try_from(order: MaterialOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order.id,
            order_number: order.order_number,
            job_id: order.job_id,
            supplier_id: order.supplier_id,
            status: order.status.parse::<OrderStatus>()?,
            created_at: order.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewOrder> for NewMaterialOrder<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        Self {
            order_number: order.order_number.as_str(),
            job_id: order.job_id,
            supplier_id: order.supplier_id,
            status: OrderStatus::Draft.to_string(),
        }
    }
}

impl From<OrderLine> for DomainLine {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            order_id: line.order_id,
            component_id: line.component_id,
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
        }
    }
}

impl NewOrderLine {
    pub fn from_domain(order_id: i32, line: &DomainNewLine) -> Self {
        Self {
            order_id,
            component_id: line.component_id,
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
        }
    }
}
