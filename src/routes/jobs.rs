use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::jobs::JobsQuery;
use crate::forms::jobs::UpdateJobForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, jobs as jobs_service};

#[get("/jobs")]
pub async fn jobs(
    params: web::Query<JobsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match jobs_service::load_jobs_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("jobs", &data.jobs);
            if let Some(status_filter) = &data.status_filter {
                context.insert("status_filter", status_filter);
            }

            render_template(&tera, "jobs/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list jobs: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/job/{job_id}")]
pub async fn show_job(
    job_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match jobs_service::load_job_page(repo.get_ref(), &user, job_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "jobs",
                &server_config.auth_service_url,
            );
            context.insert("job", &data.job);
            context.insert("lead", &data.lead);
            context.insert("team", &data.team);
            context.insert("teams", &data.teams);
            context.insert("orders", &data.orders);
            context.insert("documents", &data.documents);

            render_template(&tera, "jobs/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            redirect("/jobs")
        }
        Err(err) => {
            log::error!("Failed to load job: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/job/save")]
pub async fn save_job(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateJobForm>,
) -> impl Responder {
    let job_url = format!("/job/{}", form.id);
    match jobs_service::update_job(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Job updated.").send();
            redirect(&job_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Job not found.").send();
            redirect("/jobs")
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect(&job_url)
        }
        Err(err) => {
            log::error!("Failed to update job: {err}");
            FlashMessage::error("Could not update the job.").send();
            redirect(&job_url)
        }
    }
}

#[get("/my/jobs")]
pub async fn installer_jobs(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match jobs_service::load_installer_jobs(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "my_jobs",
                &server_config.auth_service_url,
            );
            context.insert("team", &data.team);
            context.insert("jobs", &data.jobs);

            render_template(&tera, "jobs/installer.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load installer jobs: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
