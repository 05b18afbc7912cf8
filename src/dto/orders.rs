//! DTOs shaped for material order templates.

use serde::Deserialize;

use crate::domain::catalog::{Component, Supplier};
use crate::domain::job::InstallationJob;
use crate::domain::order::{MaterialOrder, OrderLine};
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub page: Option<usize>,
}

pub struct OrdersPageData {
    pub orders: Paginated<(MaterialOrder, Supplier)>,
    pub status_filter: Option<String>,
}

pub struct OrderPageData {
    pub order: MaterialOrder,
    pub supplier: Supplier,
    pub job: InstallationJob,
    pub lines: Vec<(OrderLine, Component)>,
    pub total_cents: i64,
}
