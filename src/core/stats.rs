//! Aggregation over payment and client records.
//!
//! All functions here are pure: they borrow their input, never mutate it, and
//! preserve the relative order of whatever they return.

use serde::Serialize;

use super::payment::{Client, ConnectionStatus, Payment, PaymentStatus};

/// Amount sums over a payment collection, overall and per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PaymentTotals {
    /// Sum of every amount
    pub total: f64,
    /// Sum of approved amounts
    pub approved: f64,
    /// Sum of pending amounts
    pub pending: f64,
    /// Sum of failed amounts
    pub failed: f64,
    /// Sum of cancelled amounts
    pub cancelled: f64,
}

impl PaymentTotals {
    /// The subtotal for one status.
    #[must_use]
    pub const fn for_status(&self, status: PaymentStatus) -> f64 {
        match status {
            PaymentStatus::Approved => self.approved,
            PaymentStatus::Pending => self.pending,
            PaymentStatus::Failed => self.failed,
            PaymentStatus::Cancelled => self.cancelled,
        }
    }
}

/// Returns the payments owned by `client_id`, in their original order.
#[must_use]
pub fn filter_by_client(payments: &[Payment], client_id: &str) -> Vec<Payment> {
    payments
        .iter()
        .filter(|p| p.client_id.as_deref() == Some(client_id))
        .cloned()
        .collect()
}

/// Sums amounts overall and per status in a single pass.
#[must_use]
pub fn compute_totals(payments: &[Payment]) -> PaymentTotals {
    payments
        .iter()
        .fold(PaymentTotals::default(), |mut totals, payment| {
            totals.total += payment.amount;
            match payment.status {
                PaymentStatus::Approved => totals.approved += payment.amount,
                PaymentStatus::Pending => totals.pending += payment.amount,
                PaymentStatus::Failed => totals.failed += payment.amount,
                PaymentStatus::Cancelled => totals.cancelled += payment.amount,
            }
            totals
        })
}

/// Number of payments currently in `status`.
#[must_use]
pub fn count_by_status(payments: &[Payment], status: PaymentStatus) -> usize {
    payments.iter().filter(|p| p.status == status).count()
}

/// Search box and status tab of the payments table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    /// Case-insensitive substring matched against contact, description and id
    pub search: Option<String>,
    /// Only this status; `None` shows all
    pub status: Option<PaymentStatus>,
}

impl PaymentFilter {
    /// Whether a single payment passes the filter.
    #[must_use]
    pub fn matches(&self, payment: &Payment) -> bool {
        let matches_status = self.status.is_none_or(|status| payment.status == status);
        let matches_search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .is_none_or(|term| {
                let term = term.to_lowercase();
                payment.contact.to_lowercase().contains(&term)
                    || payment.description.to_lowercase().contains(&term)
                    || payment.id.to_lowercase().contains(&term)
            });
        matches_status && matches_search
    }
}

/// Applies a table filter, preserving order.
#[must_use]
pub fn filter_payments<'a>(payments: &'a [Payment], filter: &PaymentFilter) -> Vec<&'a Payment> {
    payments.iter().filter(|p| filter.matches(p)).collect()
}

/// One slice of the status distribution chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSlice {
    /// Status the slice represents
    pub status: PaymentStatus,
    /// Summed amount for that status
    pub amount: f64,
    /// Share of the summed status amounts, in percent
    pub percent: f64,
}

/// Status distribution for the pie chart. Statuses with no amount are left out.
#[must_use]
pub fn status_distribution(totals: &PaymentTotals) -> Vec<StatusSlice> {
    let sum: f64 = PaymentStatus::ALL
        .iter()
        .map(|status| totals.for_status(*status))
        .sum();

    PaymentStatus::ALL
        .into_iter()
        .map(|status| (status, totals.for_status(status)))
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(status, amount)| StatusSlice {
            status,
            amount,
            percent: amount / sum * 100.0,
        })
        .collect()
}

/// Number of clients whose payment-processor account is connected.
#[must_use]
pub fn count_connected(clients: &[Client]) -> usize {
    clients
        .iter()
        .filter(|c| c.mp_status == ConnectionStatus::Connected)
        .count()
}

/// One bar group of the admin per-client chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientChartRow {
    /// Client name
    pub name: String,
    /// Stored total billed
    pub total: f64,
    /// Stored approved amount
    pub approved: f64,
    /// Stored pending amount
    pub pending: f64,
}

/// Per-client chart rows built from the clients' stored totals.
#[must_use]
pub fn client_chart_rows(clients: &[Client]) -> Vec<ClientChartRow> {
    clients
        .iter()
        .map(|c| ClientChartRow {
            name: c.name.clone(),
            total: c.total_payments,
            approved: c.approved,
            pending: c.pending,
        })
        .collect()
}
