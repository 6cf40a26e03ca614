//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    /// HMAC secret used to sign bearer tokens.
    pub secret: String,
}
