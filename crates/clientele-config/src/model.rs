//! Configuration schema for Clientele.

use serde::{Deserialize, Serialize};

/// Default record store endpoint.
pub const DEFAULT_BASE_URL: &str = "https://685013d7e7c42cfd17974a33.mockapi.io";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Root config for the Clientele client.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClienteleConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Remote record store endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_records_path")]
    pub records_path: String,
    #[serde(default = "default_countries_path")]
    pub countries_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            records_path: default_records_path(),
            countries_path: default_countries_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_records_path() -> String {
    "/taxes".to_string()
}

fn default_countries_path() -> String {
    "/countries".to_string()
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default)]
    pub timezone: DisplayTimezone,
}

/// Zone used when rendering record timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTimezone {
    #[default]
    Utc,
    Local,
}
