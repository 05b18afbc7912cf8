use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::lead::{AddCommentForm, SaveLeadForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, leads as leads_service};

#[get("/lead/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_lead_page(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("lead", &data.lead);
            context.insert("quote_items", &data.quote_items);
            context.insert("quote_total_cents", &data.quote_total_cents);
            context.insert("events", &data.events);
            context.insert("documents", &data.documents);
            context.insert("components", &data.components);
            context.insert("total_events", &data.total_events);

            render_template(&tera, "lead/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load lead: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/lead/save")]
pub async fn save_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveLeadForm>,
) -> impl Responder {
    let lead_url = format!("/lead/{}", form.id);
    match leads_service::save_lead(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Lead updated.").send();
            redirect(&lead_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect(&lead_url)
        }
        Err(err) => {
            log::error!("Failed to update lead: {err}");
            FlashMessage::error("Could not update the lead.").send();
            redirect(&lead_url)
        }
    }
}

#[post("/lead/comment")]
pub async fn comment_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCommentForm>,
) -> impl Responder {
    let lead_url = format!("/lead/{}", form.id);
    match leads_service::comment_lead(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Comment added.").send();
            redirect(&lead_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect(&lead_url)
        }
        Err(err) => {
            log::error!("Failed to add comment: {err}");
            FlashMessage::error("Could not add the comment.").send();
            redirect(&lead_url)
        }
    }
}

#[post("/lead/quote")]
pub async fn save_quote(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    match leads_service::save_quote_items(repo.get_ref(), &user, body.as_ref()) {
        Ok(lead_id) => {
            FlashMessage::success("Quote lines updated.").send();
            redirect(&format!("/lead/{lead_id}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to save quote lines: {err}");
            FlashMessage::error("Could not save the quote lines.").send();
            redirect("/")
        }
    }
}
