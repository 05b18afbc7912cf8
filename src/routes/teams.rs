use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::teams::SaveTeamForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, teams as teams_service};

#[get("/teams")]
pub async fn teams(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match teams_service::load_teams_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "teams",
                &server_config.auth_service_url,
            );
            context.insert("teams", &data.teams);

            render_template(&tera, "teams/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list teams: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/teams/save")]
pub async fn save_team(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveTeamForm>,
) -> impl Responder {
    match teams_service::save_team(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Team saved.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save team: {err}");
            FlashMessage::error("Could not save the team.").send();
        }
    }
    redirect("/teams")
}

#[post("/teams/delete/{team_id}")]
pub async fn delete_team(
    team_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match teams_service::delete_team(repo.get_ref(), &user, team_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Team removed.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(err) => {
            log::error!("Failed to delete team: {err}");
            FlashMessage::error("Could not remove the team.").send();
        }
    }
    redirect("/teams")
}
