use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::catalog::{ComponentForm, StockAdjustForm, SupplierForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, catalog as catalog_service};

#[get("/catalog")]
pub async fn catalog(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog_service::load_catalog_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "catalog",
                &server_config.auth_service_url,
            );
            context.insert("suppliers", &data.suppliers);
            context.insert("components", &data.components);

            render_template(&tera, "catalog/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load catalog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/catalog/supplier/save")]
pub async fn save_supplier(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SupplierForm>,
) -> impl Responder {
    match catalog_service::save_supplier(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Supplier saved.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save supplier: {err}");
            FlashMessage::error("Could not save the supplier.").send();
        }
    }
    redirect("/catalog")
}

#[post("/catalog/component/save")]
pub async fn save_component(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ComponentForm>,
) -> impl Responder {
    match catalog_service::save_component(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Component saved.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save component: {err}");
            FlashMessage::error("Could not save the component.").send();
        }
    }
    redirect("/catalog")
}

#[post("/catalog/stock")]
pub async fn adjust_stock(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StockAdjustForm>,
) -> impl Responder {
    match catalog_service::adjust_stock(repo.get_ref(), &user, &form) {
        Ok(component) => {
            FlashMessage::success(format!(
                "Stock for {} is now {}.",
                component.sku, component.stock_on_hand
            ))
            .send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Component not found.").send();
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to adjust stock: {err}");
            FlashMessage::error("Could not adjust the stock level.").send();
        }
    }
    redirect("/catalog")
}
