//! Unified error type for the dashboard.
//!
//! Validation errors are meant to be shown to the user and recovered from.
//! Storage errors are normally absorbed by [`crate::core::persisted::Persisted`]
//! and only surface from the raw [`crate::core::storage::KeyValueStore`] API.

use thiserror::Error;

/// All errors produced by the dashboard library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Local key-value database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure, usually while saving an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required form field was left empty
    #[error("{message}")]
    Validation {
        /// Message shown to the user
        message: String,
    },

    /// The amount field is not a finite, non-negative number
    #[error("Invalid amount: '{input}' is not a valid non-negative number")]
    InvalidAmount {
        /// Raw text entered by the user
        input: String,
    },

    /// The payment-link modal was asked to do something its current state does not allow
    #[error("Invalid transition: {message}")]
    InvalidTransition {
        /// What was attempted
        message: String,
    },

    /// No payment with the given id exists in the working collection
    #[error("Payment not found: {id}")]
    PaymentNotFound {
        /// The id that was looked up
        id: String,
    },

    /// A stored or typed role string is not `client` or `admin`
    #[error("Unknown role: '{value}'")]
    UnknownRole {
        /// The offending value
        value: String,
    },
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for Error {
    fn from(value: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        Self::Io(value.into_error())
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
