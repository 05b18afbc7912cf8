//! Supplier and inventory component management.

use validator::Validate;

use crate::domain::catalog::{Component, NewSupplier, Supplier};
use crate::forms::catalog::{ComponentForm, StockAdjustForm, SupplierForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CatalogReader, CatalogWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub struct CatalogPageData {
    pub suppliers: Vec<Supplier>,
    pub components: Vec<(Component, Supplier)>,
}

/// Loads suppliers and the component catalog for the admin page.
pub fn load_catalog_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CatalogPageData>
where
    R: CatalogReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(CatalogPageData {
        suppliers: repo.list_suppliers(false)?,
        components: repo.list_components()?,
    })
}

/// Creates or updates a supplier record.
pub fn save_supplier<R>(repo: &R, user: &AuthenticatedUser, form: &SupplierForm) -> ServiceResult<()>
where
    R: CatalogReader + CatalogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Supplier form failed validation".to_string(),
        ));
    }

    let new_supplier: NewSupplier = form.into();

    match form.supplier_id() {
        Some(supplier_id) => {
            repo.get_supplier_by_id(supplier_id)?
                .ok_or(ServiceError::NotFound)?;
            repo.update_supplier(supplier_id, &new_supplier)?;
        }
        None => {
            repo.create_supplier(&new_supplier)?;
        }
    }

    Ok(())
}

/// Creates or updates an inventory component.
pub fn save_component<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ComponentForm,
) -> ServiceResult<()>
where
    R: CatalogReader + CatalogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Component form failed validation".to_string(),
        ));
    }

    repo.get_supplier_by_id(form.supplier_id)?
        .ok_or_else(|| ServiceError::Form("Unknown supplier selected.".to_string()))?;

    match form.component_id() {
        Some(component_id) => {
            repo.get_component_by_id(component_id)?
                .ok_or(ServiceError::NotFound)?;
            repo.update_component(component_id, &form.to_update_component()?)?;
        }
        None => {
            repo.create_component(&form.to_new_component()?)?;
        }
    }

    Ok(())
}

/// Applies a manual stock-take adjustment.
pub fn adjust_stock<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &StockAdjustForm,
) -> ServiceResult<Component>
where
    R: CatalogReader + CatalogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_component_by_id(form.id)?
        .ok_or(ServiceError::NotFound)?;

    let component = repo.adjust_component_stock(form.id, form.parsed_delta()?)?;
    Ok(component)
}
