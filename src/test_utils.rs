//! Shared test utilities.
//!
//! Helpers for setting up an in-memory store and building records with
//! sensible defaults.

use crate::{
    config::{AppConfig, database},
    core::{
        payment::{Payment, PaymentStatus},
        storage::{KeyValueStore, SqliteStore},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DbErr;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` store with all tables initialized.
pub async fn setup_test_store() -> Result<SqliteStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    Ok(SqliteStore::new(db))
}

/// Default configuration with the simulation delay disabled and exports
/// directed at `export_dir`.
#[must_use]
pub fn test_config(export_dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.dashboard.simulation_delay_ms = 0;
    config.dashboard.export_dir = export_dir.display().to_string();
    config
}

/// Builds a payment with sensible defaults.
///
/// # Defaults
/// * `date`: 2025-01-15
/// * `contact`: `"Test Contact"`
/// * `description`: `"Test payment"`
pub fn sample_payment(
    id: &str,
    amount: f64,
    status: PaymentStatus,
    client_id: Option<&str>,
) -> Payment {
    Payment {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
        contact: "Test Contact".to_string(),
        description: "Test payment".to_string(),
        amount,
        status,
        client_id: client_id.map(str::to_string),
    }
}

/// A store whose every operation fails, for exercising degraded paths.
#[derive(Debug, Clone, Copy)]
pub struct FailingStore;

fn unavailable() -> Error {
    Error::Database(DbErr::Custom("storage unavailable".to_string()))
}

impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(unavailable())
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(unavailable())
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(unavailable())
    }

    async fn clear(&self) -> Result<()> {
        Err(unavailable())
    }
}
