//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_schedule_token_ttl_days() -> i64 {
    14
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Absolute base URL used when building customer-facing links.
    pub base_url: String,
    /// Shared secret for verifying payment webhook signatures.
    pub payment_webhook_secret: String,
    /// HTTP endpoint the outbox worker delivers rendered emails to.
    pub mail_relay_url: String,
    #[serde(default = "default_schedule_token_ttl_days")]
    pub schedule_token_ttl_days: i64,
}
