//! Payment and client records.
//!
//! These are plain data types; serialization follows the camelCase JSON shape
//! used by the persisted `clientPayments` value and the JSON export.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// Lifecycle status of a payment link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Paid
    Approved,
    /// Link issued, not yet paid
    Pending,
    /// Payment attempt failed
    Failed,
    /// Link cancelled
    Cancelled,
}

impl PaymentStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [Self::Approved, Self::Pending, Self::Failed, Self::Cancelled];

    /// Lowercase identifier used in storage and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation {
                message: format!("Unknown payment status '{s}'"),
            })
    }
}

/// One payment-link transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier, e.g. `PAY-001`
    pub id: String,
    /// Issue date
    pub date: NaiveDate,
    /// Name of the payer
    pub contact: String,
    /// Free-text concept
    pub description: String,
    /// Amount, always finite and non-negative
    pub amount: f64,
    /// Current status
    pub status: PaymentStatus,
    /// Owning client, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Payment {
    /// True if the amount is finite and not negative.
    #[must_use]
    pub const fn has_valid_amount(&self) -> bool {
        self.amount.is_finite() && self.amount >= 0.0
    }
}

/// Payment-processor connection state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Credentials linked and working
    Connected,
    /// No credentials
    Disconnected,
    /// Linking in progress
    Pending,
}

impl ConnectionStatus {
    /// Lowercase identifier used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tenant of the integration owning zero or more payments.
///
/// The totals are stored figures from the seed data and are not recomputed
/// from the payment records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier
    pub id: String,
    /// Business name
    pub name: String,
    /// Contact email
    pub email: String,
    /// CRM sub-account reference
    pub ghl_subaccount: String,
    /// Payment-processor connection state
    pub mp_status: ConnectionStatus,
    /// Stored total billed
    pub total_payments: f64,
    /// Stored approved amount
    pub approved: f64,
    /// Stored pending amount
    pub pending: f64,
    /// Last time the stored figures were refreshed
    pub last_update: NaiveDateTime,
    /// Payment-processor access token (plaintext in this prototype)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp_token: Option<String>,
    /// CRM access token (plaintext in this prototype)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghl_token: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(
            "Approved".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Approved
        );
        assert_eq!(
            " cancelled ".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Cancelled
        );
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_payment_json_shape() {
        let payment = Payment {
            id: "PAY-001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            contact: "Juan Pérez".to_string(),
            description: "Membresía Premium - Enero".to_string(),
            amount: 15000.0,
            status: PaymentStatus::Approved,
            client_id: Some("1".to_string()),
        };

        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(value["date"], "2025-01-15");
        assert_eq!(value["status"], "approved");
        assert_eq!(value["clientId"], "1");
    }

    #[test]
    fn test_payment_without_client_omits_field() {
        let json = r#"{"id":"PAY-9","date":"2025-01-01","contact":"a","description":"b","amount":1,"status":"failed"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.client_id, None);
        assert!(!serde_json::to_string(&payment).unwrap().contains("clientId"));
    }

    #[test]
    fn test_negative_or_infinite_amount_is_invalid() {
        let json = r#"{"id":"PAY-9","date":"2025-01-01","contact":"a","description":"b","amount":-500,"status":"approved"}"#;
        let mut payment: Payment = serde_json::from_str(json).unwrap();
        assert!(!payment.has_valid_amount());

        payment.amount = f64::INFINITY;
        assert!(!payment.has_valid_amount());

        payment.amount = 0.0;
        assert!(payment.has_valid_amount());
    }
}
