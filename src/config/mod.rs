/// Database connection and table creation for the local store
pub mod database;

/// Dashboard settings loading from config.toml
pub mod settings;

pub use settings::{AppConfig, DashboardConfig, load_config, load_config_or_default};
