use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::blog::BlogPostForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, blog as blog_service};

#[get("/blog")]
pub async fn blog(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blog_service::load_blog_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "blog",
                &server_config.auth_service_url,
            );
            context.insert("posts", &data.posts);

            render_template(&tera, "blog/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load blog posts: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/blog/save")]
pub async fn save_post(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BlogPostForm>,
) -> impl Responder {
    match blog_service::save_post(repo.get_ref(), &user, &form) {
        Ok(()) => FlashMessage::success("Post saved.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send()
        }
        Err(err) => {
            log::error!("Failed to save post: {err}");
            FlashMessage::error("Could not save the post.").send();
        }
    }
    redirect("/blog")
}

#[post("/blog/delete/{post_id}")]
pub async fn delete_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match blog_service::delete_post(repo.get_ref(), &user, post_id.into_inner()) {
        Ok(()) => FlashMessage::success("Post removed.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Not enough permissions.").send();
            return redirect("/na");
        }
        Err(err) => {
            log::error!("Failed to delete post: {err}");
            FlashMessage::error("Could not remove the post.").send();
        }
    }
    redirect("/blog")
}
