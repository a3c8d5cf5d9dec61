//! CSV and JSON exports.
//!
//! The `to_*` functions are pure and return the file contents; [`save_export`]
//! is the only part that touches the filesystem.

use crate::errors::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::payment::{Client, Payment};

/// Column names of the payments CSV export.
pub const PAYMENT_CSV_HEADER: [&str; 6] = ["ID", "Fecha", "Contacto", "Descripción", "Monto", "Estado"];

/// Column names of the clients CSV export.
pub const CLIENT_CSV_HEADER: [&str; 9] = [
    "ID",
    "Nombre",
    "Email",
    "Subcuenta GHL",
    "Estado MP",
    "Total Pagos",
    "Aprobados",
    "Pendientes",
    "Última Actualización",
];

/// Default file stem for CSV exports.
pub const DEFAULT_CSV_FILENAME: &str = "pagos";
/// Default file stem for JSON exports.
pub const DEFAULT_JSON_FILENAME: &str = "datos";

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn write_csv<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner()?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Renders payments as CSV, one row per payment in input order.
///
/// Fields containing commas, quotes or line breaks are quoted.
pub fn to_csv(payments: &[Payment]) -> Result<String> {
    write_csv(
        PAYMENT_CSV_HEADER,
        payments.iter().map(|p| {
            [
                p.id.clone(),
                p.date.format("%Y-%m-%d").to_string(),
                p.contact.clone(),
                p.description.clone(),
                p.amount.to_string(),
                p.status.to_string(),
            ]
        }),
    )
}

/// Renders clients as CSV. Credential tokens are not exported.
pub fn clients_to_csv(clients: &[Client]) -> Result<String> {
    write_csv(
        CLIENT_CSV_HEADER,
        clients.iter().map(|c| {
            [
                c.id.clone(),
                c.name.clone(),
                c.email.clone(),
                c.ghl_subaccount.clone(),
                c.mp_status.to_string(),
                c.total_payments.to_string(),
                c.approved.to_string(),
                c.pending.to_string(),
                c.last_update.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ]
        }),
    )
}

/// Serializes any value as JSON indented with two spaces.
pub fn to_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(Into::into)
}

/// Writes `contents` to `<dir>/<filename>.<ext>`, creating `dir` if needed.
#[instrument(skip(contents))]
pub fn save_export(
    dir: &Path,
    filename: &str,
    format: ExportFormat,
    contents: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{filename}.{}", format.extension()));
    std::fs::write(&path, contents)?;
    info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(path)
}
