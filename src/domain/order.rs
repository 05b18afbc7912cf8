use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Draft,
    Sent,
    Confirmed,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Sent => "sent",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
        };
        write!(f, "{s}")
    }
}

impl FromStr for OrderStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(OrderStatus::Draft),
            "sent" => Ok(OrderStatus::Sent),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// A purchase order sent to one supplier for one job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MaterialOrder {
    pub id: i32,
    pub order_number: String,
    pub job_id: i32,
    pub supplier_id: i32,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub component_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl OrderLine {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

/// Sum of the line totals for an order.
pub fn order_total_cents(lines: &[OrderLine]) -> i64 {
    lines.iter().map(OrderLine::line_total_cents).sum()
}

#[derive(Clone, Debug)]
pub struct NewMaterialOrder {
    pub order_number: String,
    pub job_id: i32,
    pub supplier_id: i32,
}

#[derive(Clone, Debug)]
pub struct NewOrderLine {
    pub component_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_line_amounts() {
        let lines = vec![
            OrderLine {
                id: 1,
                order_id: 1,
                component_id: 10,
                quantity: 12,
                unit_price_cents: 25_000,
            },
            OrderLine {
                id: 2,
                order_id: 1,
                component_id: 11,
                quantity: 1,
                unit_price_cents: 180_000,
            },
        ];
        assert_eq!(lines[0].line_total_cents(), 300_000);
        assert_eq!(order_total_cents(&lines), 480_000);
        assert_eq!(order_total_cents(&[]), 0);
    }
}
