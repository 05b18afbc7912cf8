//! Outbox worker: delivers queued emails to the HTTP mail relay.
//!
//! Intended to run from cron; each invocation drains one batch of pending
//! notifications and exits.

use std::env;

use config::Config;
use dotenvy::dotenv;

use solar_ops::db::establish_connection_pool;
use solar_ops::models::config::ServerConfig;
use solar_ops::repository::DieselRepository;
use solar_ops::services::notifications::deliver_pending;

fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config_path = env::var("SOLAR_OPS_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    let settings = Config::builder()
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::with_prefix("SOLAR_OPS").separator("__"))
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let server_config: ServerConfig = settings
        .try_deserialize()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    let repo = DieselRepository::new(pool);

    match deliver_pending(&repo, &server_config.mail_relay_url) {
        Ok((sent, failed)) => {
            log::info!("Outbox drained: {sent} sent, {failed} failed");
            Ok(())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "Failed to deliver notifications: {e}"
        ))),
    }
}
