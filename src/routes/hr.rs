use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::hr::{ApplicationForm, ApplicationStatusForm, PositionForm, VacancyForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, hr as hr_service};

#[get("/hr")]
pub async fn hr(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match hr_service::load_hr_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "hr",
                &server_config.auth_service_url,
            );
            context.insert("positions", &data.positions);
            context.insert("vacancies", &data.vacancies);
            context.insert("applications", &data.applications);

            render_template(&tera, "hr/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load HR page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/hr/position/save")]
pub async fn save_position(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PositionForm>,
) -> impl Responder {
    match hr_service::save_position(repo.get_ref(), &user, &form) {
        Ok(()) => FlashMessage::success("Position saved.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to save position: {err}");
            FlashMessage::error("Could not save the position.").send();
        }
    }
    redirect("/hr")
}

#[post("/hr/vacancy/open")]
pub async fn open_vacancy(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<VacancyForm>,
) -> impl Responder {
    match hr_service::open_vacancy(repo.get_ref(), &user, &form) {
        Ok(()) => FlashMessage::success("Vacancy opened.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send()
        }
        Err(err) => {
            log::error!("Failed to open vacancy: {err}");
            FlashMessage::error("Could not open the vacancy.").send();
        }
    }
    redirect("/hr")
}

#[post("/hr/vacancy/close/{vacancy_id}")]
pub async fn close_vacancy(
    vacancy_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match hr_service::close_vacancy(repo.get_ref(), &user, vacancy_id.into_inner()) {
        Ok(()) => FlashMessage::success("Vacancy closed.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Vacancy not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to close vacancy: {err}");
            FlashMessage::error("Could not close the vacancy.").send();
        }
    }
    redirect("/hr")
}

#[post("/hr/application/add")]
pub async fn add_application(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ApplicationForm>,
) -> impl Responder {
    match hr_service::add_application(repo.get_ref(), &user, &form) {
        Ok(()) => FlashMessage::success("Application added.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add application: {err}");
            FlashMessage::error("Could not add the application.").send();
        }
    }
    redirect("/hr")
}

#[post("/hr/application/status")]
pub async fn application_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ApplicationStatusForm>,
) -> impl Responder {
    match hr_service::advance_application(repo.get_ref(), &user, &form) {
        Ok(application) => {
            FlashMessage::success(format!(
                "{} moved to {}.",
                application.name, application.status
            ))
            .send()
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Application not found.").send(),
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send()
        }
        Err(err) => {
            log::error!("Failed to update application: {err}");
            FlashMessage::error("Could not update the application.").send();
        }
    }
    redirect("/hr")
}
