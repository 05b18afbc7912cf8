//! Payment provider webhook endpoint.
//!
//! The provider retries deliveries that do not get a 2xx, so repository
//! failures map to a 500 while signature problems and irrelevant events are
//! answered definitively.

use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::checkout::{
    CheckoutContext, CheckoutEvent, CheckoutOutcome, process_checkout, verify_signature,
};
use crate::services::ServiceError;

pub const SIGNATURE_HEADER: &str = "Payment-Signature";

const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// Envelope of a payment provider event delivery.
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: CheckoutSession,
}

/// The checkout session object carried by a completed-checkout event.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Lead id the session was created for.
    pub client_reference_id: Option<String>,
    pub amount_total: Option<i64>,
    pub customer_details: Option<CustomerDetails>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

#[post("/webhooks/payments")]
pub async fn payment_webhook(
    req: HttpRequest,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Some(signature) = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return HttpResponse::BadRequest().json(json!({"error": "missing signature"}));
    };

    if let Err(err) = verify_signature(
        &server_config.payment_webhook_secret,
        signature,
        &body,
        Utc::now().timestamp(),
    ) {
        log::warn!("Rejecting webhook delivery: {err}");
        return HttpResponse::BadRequest().json(json!({"error": "invalid signature"}));
    }

    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            log::warn!("Rejecting unparseable webhook payload: {err}");
            return HttpResponse::BadRequest().json(json!({"error": "invalid payload"}));
        }
    };

    if envelope.event_type != CHECKOUT_COMPLETED {
        return HttpResponse::Ok().json(json!({"status": "ignored"}));
    }

    let session = envelope.data.object;
    let lead_id = match session
        .client_reference_id
        .as_deref()
        .and_then(|id| id.parse::<i32>().ok())
    {
        Some(lead_id) => lead_id,
        None => {
            log::warn!(
                "Checkout {} arrived without a usable lead reference",
                session.id
            );
            return HttpResponse::Ok().json(json!({"status": "ignored"}));
        }
    };

    let event = CheckoutEvent {
        session_id: session.id,
        lead_id,
        amount_cents: session.amount_total.unwrap_or_default(),
        customer_email: session.customer_details.and_then(|details| details.email),
    };

    let ctx = CheckoutContext {
        today: Utc::now().date_naive(),
        base_url: server_config.base_url.clone(),
        token_ttl_days: server_config.schedule_token_ttl_days,
    };

    match process_checkout(repo.get_ref(), &event, &ctx) {
        Ok(CheckoutOutcome::Created { job, orders_created }) => {
            log::info!(
                "Created job {} for lead {} ({} orders) from event {}",
                job.job_number,
                event.lead_id,
                orders_created,
                envelope.id
            );
            HttpResponse::Ok().json(json!({
                "status": "created",
                "job_number": job.job_number,
            }))
        }
        Ok(CheckoutOutcome::AlreadyProcessed) => {
            HttpResponse::Ok().json(json!({"status": "already_processed"}))
        }
        Ok(CheckoutOutcome::UnknownLead) => {
            HttpResponse::Ok().json(json!({"status": "ignored"}))
        }
        Err(ServiceError::NotFound) => HttpResponse::Ok().json(json!({"status": "ignored"})),
        Err(err) => {
            // Signal the provider to retry the delivery.
            log::error!("Checkout processing failed for event {}: {err}", envelope.id);
            HttpResponse::InternalServerError().json(json!({"error": "processing failed"}))
        }
    }
}
