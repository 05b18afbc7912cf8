use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::orders::OrdersQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, orders as orders_service};

#[get("/orders")]
pub async fn orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match orders_service::load_orders_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("orders", &data.orders);
            if let Some(status_filter) = &data.status_filter {
                context.insert("status_filter", status_filter);
            }

            render_template(&tera, "orders/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/order/{order_id}")]
pub async fn show_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match orders_service::load_order_page(repo.get_ref(), &user, order_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("order", &data.order);
            context.insert("supplier", &data.supplier);
            context.insert("job", &data.job);
            context.insert("lines", &data.lines);
            context.insert("total_cents", &data.total_cents);

            render_template(&tera, "orders/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Order not found.").send();
            redirect("/orders")
        }
        Err(err) => {
            log::error!("Failed to load order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/order/send/{order_id}")]
pub async fn send_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    match orders_service::send_order(repo.get_ref(), &tera, &user, order_id) {
        Ok(order) => {
            FlashMessage::success(format!("Order {} sent to the supplier.", order.order_number))
                .send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to send order: {err}");
            FlashMessage::error("Could not send the order.").send();
        }
    }
    redirect(&format!("/order/{order_id}"))
}

#[post("/order/confirm/{order_id}")]
pub async fn confirm_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    match orders_service::confirm_order(repo.get_ref(), &user, order_id) {
        Ok(_) => {
            FlashMessage::success("Order confirmed.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to confirm order: {err}");
            FlashMessage::error("Could not confirm the order.").send();
        }
    }
    redirect(&format!("/order/{order_id}"))
}

#[post("/order/delivered/{order_id}")]
pub async fn order_delivered(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    match orders_service::mark_delivered(repo.get_ref(), &user, order_id) {
        Ok(_) => {
            FlashMessage::success("Order delivered; stock booked in.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to mark order delivered: {err}");
            FlashMessage::error("Could not update the order.").send();
        }
    }
    redirect(&format!("/order/{order_id}"))
}
