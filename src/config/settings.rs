//! Dashboard settings loaded from config.toml
//!
//! Every field has a default, so a missing file is not an error. A file that
//! exists but cannot be parsed is.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Dashboard behavior
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Settings for the client and admin dashboards
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// Client whose payments the client dashboard shows
    pub client_id: String,
    /// Directory exports are written to
    pub export_dir: String,
    /// Cosmetic pause before a simulated outcome returns the modal to the form
    pub simulation_delay_ms: u64,
    /// Base URL of generated payment links
    pub link_base_url: String,
    /// Base URL of generated invite links
    pub invite_base_url: String,
    /// OAuth callback URL shown on the admin settings tab
    pub callback_url: String,
    /// Payment-processor application id shown (masked) on the admin settings tab
    pub app_id: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            client_id: "1".to_string(),
            export_dir: "exports".to_string(),
            simulation_delay_ms: 1500,
            link_base_url: "https://mpago.la".to_string(),
            invite_base_url: "https://app.integracion.com/invite".to_string(),
            callback_url: "https://app.integracion.com/callback".to_string(),
            app_id: "1234567890abcdef".to_string(),
        }
    }
}

impl DashboardConfig {
    /// The simulation delay as a [`Duration`].
    #[must_use]
    pub const fn simulation_delay(&self) -> Duration {
        Duration::from_millis(self.simulation_delay_ms)
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from `path`, falling back to defaults when the file does not exist.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_config(path_ref)
    } else {
        info!(
            "No configuration file at {}, using defaults",
            path_ref.display()
        );
        Ok(AppConfig::default())
    }
}
