//! Repository implementation for material orders.

use diesel::{Connection, prelude::*};

use crate::domain::catalog::Supplier;
use crate::domain::order::{MaterialOrder, NewMaterialOrder, NewOrderLine, OrderLine, OrderStatus};
use crate::models::catalog::Supplier as DbSupplier;
use crate::models::order::{
    MaterialOrder as DbOrder, NewMaterialOrder as DbNewOrder, NewOrderLine as DbNewLine,
    OrderLine as DbLine,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OrderListQuery, OrderReader, OrderWriter};

impl OrderReader for DieselRepository {
    fn get_order_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<(MaterialOrder, Vec<OrderLine>)>> {
        use crate::schema::{material_order_lines, material_orders};

        let mut conn = self.conn()?;
        let order = material_orders::table
            .find(id)
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = material_order_lines::table
            .filter(material_order_lines::order_id.eq(order.id))
            .order(material_order_lines::id.asc())
            .load::<DbLine>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        let order = MaterialOrder::try_from(order).map_err(RepositoryError::from)?;
        Ok(Some((order, lines)))
    }

    fn list_orders(
        &self,
        query: OrderListQuery,
    ) -> RepositoryResult<(usize, Vec<(MaterialOrder, Supplier)>)> {
        use crate::schema::{material_orders, suppliers};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = material_orders::table
                .inner_join(suppliers::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(material_orders::status.eq(status.to_string()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(material_orders::created_at.desc());
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let orders = items
            .select((material_orders::all_columns, suppliers::all_columns))
            .load::<(DbOrder, DbSupplier)>(&mut conn)?
            .into_iter()
            .map(|(order, supplier)| {
                let order = MaterialOrder::try_from(order).map_err(RepositoryError::from)?;
                Ok((order, supplier.into()))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, orders))
    }

    fn list_orders_for_job(&self, job_id: i32) -> RepositoryResult<Vec<MaterialOrder>> {
        use crate::schema::material_orders;

        let mut conn = self.conn()?;
        material_orders::table
            .filter(material_orders::job_id.eq(job_id))
            .order(material_orders::order_number.asc())
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(|order| MaterialOrder::try_from(order).map_err(RepositoryError::from))
            .collect()
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(
        &self,
        new_order: &NewMaterialOrder,
        lines: &[NewOrderLine],
    ) -> RepositoryResult<MaterialOrder> {
        use crate::schema::{material_order_lines, material_orders};

        let mut conn = self.conn()?;
        let db_new_order: DbNewOrder = new_order.into();

        let order = conn.transaction::<DbOrder, diesel::result::Error, _>(move |conn| {
            let order = diesel::insert_into(material_orders::table)
                .values(&db_new_order)
                .get_result::<DbOrder>(conn)?;

            let rows: Vec<DbNewLine> = lines
                .iter()
                .map(|line| DbNewLine::from_domain(order.id, line))
                .collect();

            diesel::insert_into(material_order_lines::table)
                .values(rows)
                .execute(conn)?;

            Ok(order)
        })?;

        MaterialOrder::try_from(order).map_err(RepositoryError::from)
    }

    fn set_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<MaterialOrder> {
        use crate::schema::material_orders;

        let mut conn = self.conn()?;
        let order = diesel::update(material_orders::table.find(order_id))
            .set(material_orders::status.eq(status.to_string()))
            .get_result::<DbOrder>(&mut conn)?;

        MaterialOrder::try_from(order).map_err(RepositoryError::from)
    }
}
