//! Public customer scheduling portal; token-authenticated, no session.

use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use tera::{Context, Tera};

use crate::forms::schedule::BookingForm;
use crate::repository::DieselRepository;
use crate::routes::render_template;
use crate::services::{ServiceError, schedule as schedule_service};

fn schedule_error(tera: &Tera, message: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("message", message);
    render_template(tera, "schedule/error.html", &context)
}

#[get("/schedule/{token}")]
pub async fn show_schedule(
    token: web::Path<String>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let now = Utc::now().naive_utc();
    match schedule_service::load_schedule_page(repo.get_ref(), &token, now) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("job", &data.job);
            context.insert("lead", &data.lead);
            context.insert("offered_dates", &data.offered_dates);
            context.insert("token", &data.token);

            render_template(&tera, "schedule/index.html", &context)
        }
        Err(ServiceError::Form(message)) => schedule_error(&tera, &message),
        Err(ServiceError::NotFound) => {
            schedule_error(&tera, "This scheduling link is not valid.")
        }
        Err(err) => {
            log::error!("Failed to load scheduling page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/schedule/{token}")]
pub async fn book_schedule(
    token: web::Path<String>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<BookingForm>,
) -> impl Responder {
    let now = Utc::now().naive_utc();

    let date = match form.parsed_date() {
        Ok(date) => date,
        Err(_) => return schedule_error(&tera, "Please pick one of the offered days."),
    };

    match schedule_service::book_installation(repo.get_ref(), &token, date, now) {
        Ok(job) => {
            let mut context = Context::new();
            context.insert("job", &job);
            context.insert("date", &date);

            render_template(&tera, "schedule/confirmed.html", &context)
        }
        Err(ServiceError::Form(message)) => schedule_error(&tera, &message),
        Err(ServiceError::NotFound) => {
            schedule_error(&tera, "This scheduling link is not valid.")
        }
        Err(err) => {
            log::error!("Failed to book installation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
