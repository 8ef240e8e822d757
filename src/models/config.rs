//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::api::DEFAULT_API_BASE_URL;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Key signing the session and flash cookies; at least 64 bytes.
    pub secret: String,
    pub templates_dir: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Marks cookies `Secure`; enable behind HTTPS.
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
