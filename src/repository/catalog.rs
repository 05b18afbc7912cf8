//! Repository implementation for suppliers and inventory components.

use diesel::prelude::*;

use crate::domain::catalog::{Component, NewComponent, NewSupplier, Supplier, UpdateComponent};
use crate::models::catalog::{
    Component as DbComponent, NewComponent as DbNewComponent, NewSupplier as DbNewSupplier,
    Supplier as DbSupplier, UpdateComponent as DbUpdateComponent,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CatalogReader, CatalogWriter, DieselRepository};

impl CatalogReader for DieselRepository {
    fn get_supplier_by_id(&self, id: i32) -> RepositoryResult<Option<Supplier>> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let supplier = suppliers::table
            .find(id)
            .first::<DbSupplier>(&mut conn)
            .optional()?;

        Ok(supplier.map(Into::into))
    }

    fn list_suppliers(&self, active_only: bool) -> RepositoryResult<Vec<Supplier>> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let mut query = suppliers::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(suppliers::active.eq(true));
        }

        let suppliers = query
            .order(suppliers::name.asc())
            .load::<DbSupplier>(&mut conn)?;

        Ok(suppliers.into_iter().map(Into::into).collect())
    }

    fn get_component_by_id(&self, id: i32) -> RepositoryResult<Option<Component>> {
        use crate::schema::components;

        let mut conn = self.conn()?;
        let component = components::table
            .find(id)
            .first::<DbComponent>(&mut conn)
            .optional()?;

        Ok(component.map(Into::into))
    }

    fn list_components(&self) -> RepositoryResult<Vec<(Component, Supplier)>> {
        use crate::schema::{components, suppliers};

        let mut conn = self.conn()?;
        let rows = components::table
            .inner_join(suppliers::table)
            .order(components::sku.asc())
            .select((components::all_columns, suppliers::all_columns))
            .load::<(DbComponent, DbSupplier)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(component, supplier)| (component.into(), supplier.into()))
            .collect())
    }
}

impl CatalogWriter for DieselRepository {
    fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let db_new_supplier: DbNewSupplier = new_supplier.into();
        let supplier = diesel::insert_into(suppliers::table)
            .values(&db_new_supplier)
            .get_result::<DbSupplier>(&mut conn)?;

        Ok(supplier.into())
    }

    fn update_supplier(
        &self,
        supplier_id: i32,
        updates: &NewSupplier,
    ) -> RepositoryResult<Supplier> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let changeset: DbNewSupplier = updates.into();
        let supplier = diesel::update(suppliers::table.find(supplier_id))
            .set(changeset)
            .get_result::<DbSupplier>(&mut conn)?;

        Ok(supplier.into())
    }

    fn create_component(&self, new_component: &NewComponent) -> RepositoryResult<Component> {
        use crate::schema::components;

        let mut conn = self.conn()?;
        let db_new_component: DbNewComponent = new_component.into();
        let component = diesel::insert_into(components::table)
            .values(&db_new_component)
            .get_result::<DbComponent>(&mut conn)?;

        Ok(component.into())
    }

    fn update_component(
        &self,
        component_id: i32,
        updates: &UpdateComponent,
    ) -> RepositoryResult<Component> {
        use crate::schema::components;

        let mut conn = self.conn()?;
        let changeset: DbUpdateComponent = updates.into();
        let component = diesel::update(components::table.find(component_id))
            .set(changeset)
            .get_result::<DbComponent>(&mut conn)?;

        Ok(component.into())
    }

    fn adjust_component_stock(
        &self,
        component_id: i32,
        delta: i32,
    ) -> RepositoryResult<Component> {
        use crate::schema::components;

        let mut conn = self.conn()?;
        let component = diesel::update(components::table.find(component_id))
            .set(components::stock_on_hand.eq(components::stock_on_hand + delta))
            .get_result::<DbComponent>(&mut conn)?;

        Ok(component.into())
    }
}
