use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::FlashMessage;
use tera::Tera;

use crate::domain::types::PublicId;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::redirect;
use crate::services::{ServiceError, documents as documents_service};

#[get("/document/{public_id}")]
pub async fn show_document(
    public_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let public_id = match public_id.parse::<PublicId>() {
        Ok(public_id) => public_id,
        Err(_) => {
            FlashMessage::error("Document not found.").send();
            return redirect("/");
        }
    };

    match documents_service::get_document(repo.get_ref(), &user, &public_id) {
        Ok(document) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(document.body_html),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Document not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load document: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/lead/{lead_id}/documents/quote")]
pub async fn generate_quote(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    match documents_service::generate_quote(repo.get_ref(), &tera, &user, lead_id) {
        Ok(document) => {
            FlashMessage::success(format!("{} generated.", document.title)).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            return redirect("/");
        }
        Err(err) => {
            log::error!("Failed to generate quote: {err}");
            FlashMessage::error("Could not generate the quote.").send();
        }
    }
    redirect(&format!("/lead/{lead_id}"))
}

#[post("/job/{job_id}/documents/compliance")]
pub async fn generate_compliance(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let job_id = job_id.into_inner();
    match documents_service::generate_compliance(repo.get_ref(), &tera, &user, job_id) {
        Ok(document) => {
            FlashMessage::success(format!("{} generated.", document.title)).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            return redirect("/jobs");
        }
        Err(err) => {
            log::error!("Failed to generate compliance declaration: {err}");
            FlashMessage::error("Could not generate the declaration.").send();
        }
    }
    redirect(&format!("/job/{job_id}"))
}

#[post("/job/{job_id}/documents/handover")]
pub async fn generate_handover(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let job_id = job_id.into_inner();
    match documents_service::generate_handover(repo.get_ref(), &tera, &user, job_id) {
        Ok(document) => {
            FlashMessage::success(format!("{} generated.", document.title)).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            return redirect("/jobs");
        }
        Err(err) => {
            log::error!("Failed to generate handover pack: {err}");
            FlashMessage::error("Could not generate the handover pack.").send();
        }
    }
    redirect(&format!("/job/{job_id}"))
}
