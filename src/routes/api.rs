use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::api::{LeadsQuery, list_leads};
use crate::services::ServiceError;

#[derive(Deserialize)]
struct ApiV1LeadsQueryParams {
    query: Option<String>,
    page: Option<usize>,
}

#[get("/v1/leads")]
pub async fn api_v1_leads(
    params: web::Query<ApiV1LeadsQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let query = LeadsQuery {
        search: params.query,
        page: params.page,
    };

    match list_leads(repo.get_ref(), &user, query) {
        Ok(response) => HttpResponse::Ok().json(json!({
            "total": response.total,
            "leads": response.leads,
        })),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
