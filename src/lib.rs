#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role required to reach any staff page.
pub const SERVICE_ACCESS_ROLE: &str = "ops";
/// Role required for admin-only mutations.
pub const SERVICE_ADMIN_ROLE: &str = "ops_admin";
/// Role carried by installer crew members for the portal.
pub const SERVICE_INSTALLER_ROLE: &str = "installer";

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::api::api_v1_leads;
#[cfg(feature = "server")]
use crate::routes::blog::{blog, delete_post, save_post};
#[cfg(feature = "server")]
use crate::routes::catalog::{adjust_stock, catalog, save_component, save_supplier};
#[cfg(feature = "server")]
use crate::routes::documents::{
    generate_compliance, generate_handover, generate_quote, show_document,
};
#[cfg(feature = "server")]
use crate::routes::hr::{
    add_application, application_status, close_vacancy, hr, open_vacancy, save_position,
};
#[cfg(feature = "server")]
use crate::routes::jobs::{installer_jobs, jobs, save_job, show_job};
#[cfg(feature = "server")]
use crate::routes::lead::{comment_lead, save_lead, save_quote, show_lead};
#[cfg(feature = "server")]
use crate::routes::main::{add_lead, leads_upload, logout, not_assigned, show_index};
#[cfg(feature = "server")]
use crate::routes::orders::{confirm_order, order_delivered, orders, send_order, show_order};
#[cfg(feature = "server")]
use crate::routes::schedule::{book_schedule, show_schedule};
#[cfg(feature = "server")]
use crate::routes::teams::{delete_team, save_team, teams};
#[cfg(feature = "server")]
use crate::routes::webhook::payment_webhook;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(payment_webhook)
            .service(show_schedule)
            .service(book_schedule)
            .service(web::scope("/api").service(api_v1_leads))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(add_lead)
                    .service(leads_upload)
                    .service(show_lead)
                    .service(save_lead)
                    .service(comment_lead)
                    .service(save_quote)
                    .service(jobs)
                    .service(show_job)
                    .service(save_job)
                    .service(installer_jobs)
                    .service(teams)
                    .service(save_team)
                    .service(delete_team)
                    .service(orders)
                    .service(show_order)
                    .service(send_order)
                    .service(confirm_order)
                    .service(order_delivered)
                    .service(catalog)
                    .service(save_supplier)
                    .service(save_component)
                    .service(adjust_stock)
                    .service(hr)
                    .service(save_position)
                    .service(open_vacancy)
                    .service(close_vacancy)
                    .service(add_application)
                    .service(application_status)
                    .service(show_document)
                    .service(generate_quote)
                    .service(generate_compliance)
                    .service(generate_handover)
                    .service(blog)
                    .service(save_post)
                    .service(delete_post)
                    .service(not_assigned)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
