//! Text renderers for the dashboards.
//!
//! Every function here is pure and returns a `String`; controllers decide when
//! to print. Amounts and dates use Argentine formatting (`$15.000`, `15/1/2025`).

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt::Write as _;

use crate::core::{
    payment::{Client, ConnectionStatus, Payment, PaymentStatus},
    stats::{ClientChartRow, StatusSlice},
};

const BAR_LENGTH: usize = 20;

/// Formats an amount like `$15.000` or `$1.234,5`, rounded to cents.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    // Cast safety: value is rounded, made non-negative and far below u64::MAX for any real amount.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        let fraction = format!("{fraction:02}");
        format!("{sign}${grouped},{}", fraction.trim_end_matches('0'))
    }
}

/// Formats a date as `d/m/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Formats a timestamp as `d/m/yyyy, hh:mm:ss`.
#[must_use]
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    format!(
        "{}, {:02}:{:02}:{:02}",
        format_date(ts.date()),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

/// Spanish label of a payment status.
#[must_use]
pub const fn status_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Approved => "Aprobado",
        PaymentStatus::Pending => "Pendiente",
        PaymentStatus::Failed => "Fallido",
        PaymentStatus::Cancelled => "Cancelado",
    }
}

/// Spanish label of a client connection state.
#[must_use]
pub const fn connection_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Conectado",
        ConnectionStatus::Disconnected => "Desconectado",
        ConnectionStatus::Pending => "Pendiente",
    }
}

/// A single stat card: title, value and optional trend line.
#[must_use]
pub fn render_card(title: &str, value: &str, trend: Option<&str>) -> String {
    trend.map_or_else(
        || format!("▸ {title}: {value}"),
        |trend| format!("▸ {title}: {value} ({trend})"),
    )
}

/// Horizontal bar like `[██████░░░░] 60.0%`.
#[must_use]
pub fn format_bar(percent: f64, length: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);

    // Cast safety: clamped ∈ [0, 100] and length is small, so the result is in [0, length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Payments table with id, date, contact, description, amount and status columns.
#[must_use]
pub fn render_payments_table(payments: &[&Payment]) -> String {
    if payments.is_empty() {
        return "No se encontraron pagos".to_string();
    }

    let mut out = format!(
        "{:<16} {:<10} {:<20} {:<28} {:>12} {}\n",
        "ID", "Fecha", "Contacto", "Descripción", "Monto", "Estado"
    );
    for p in payments {
        let _ = writeln!(
            out,
            "{:<16} {:<10} {:<20} {:<28} {:>12} {}",
            p.id,
            format_date(p.date),
            truncate(&p.contact, 20),
            truncate(&p.description, 28),
            format_amount(p.amount),
            status_label(p.status)
        );
    }
    out
}

/// Status distribution chart, one bar per non-empty status.
#[must_use]
pub fn render_status_chart(slices: &[StatusSlice]) -> String {
    if slices.is_empty() {
        return "Distribución de Pagos: sin datos".to_string();
    }

    let mut out = String::from("Distribución de Pagos\n");
    for slice in slices {
        let _ = writeln!(
            out,
            "  {:<10} {} {}",
            status_label(slice.status),
            format_bar(slice.percent, BAR_LENGTH),
            format_amount(slice.amount)
        );
    }
    out
}

/// Registered clients table. Tokens are never shown.
#[must_use]
pub fn render_clients_table(clients: &[Client]) -> String {
    let mut out = format!(
        "{:<20} {:<12} {:<12} {:>12} {:>12} {:>12}  {}\n",
        "Cliente", "Subcuenta", "Estado MP", "Total", "Aprobados", "Pendientes", "Actualizado"
    );
    for c in clients {
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<12} {:>12} {:>12} {:>12}  {}",
            truncate(&c.name, 20),
            c.ghl_subaccount,
            connection_label(c.mp_status),
            format_amount(c.total_payments),
            format_amount(c.approved),
            format_amount(c.pending),
            format_timestamp(c.last_update)
        );
    }
    out
}

/// Per-client chart of approved vs pending amounts, scaled to the largest total.
#[must_use]
pub fn render_client_chart(rows: &[ClientChartRow]) -> String {
    let max = rows.iter().map(|r| r.total).fold(0.0_f64, f64::max);
    let percent_of_max = |amount: f64| if max > 0.0 { amount / max * 100.0 } else { 0.0 };

    let mut out = String::from("Estadísticas por Cliente\n");
    for row in rows {
        let _ = writeln!(out, "  {}", row.name);
        let _ = writeln!(
            out,
            "    Aprobados  {} {}",
            format_bar(percent_of_max(row.approved), BAR_LENGTH),
            format_amount(row.approved)
        );
        let _ = writeln!(
            out,
            "    Pendientes {} {}",
            format_bar(percent_of_max(row.pending), BAR_LENGTH),
            format_amount(row.pending)
        );
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        seed::{seed_clients, seed_payments},
        stats::{client_chart_rows, compute_totals, status_distribution},
    };

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "$0");
        assert_eq!(format_amount(999.0), "$999");
        assert_eq!(format_amount(15000.0), "$15.000");
        assert_eq!(format_amount(1_234_567.0), "$1.234.567");
        assert_eq!(format_amount(1234.5), "$1.234,5");
        assert_eq!(format_amount(12.05), "$12,05");
        assert_eq!(format_amount(-250.0), "-$250");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap_or_default();
        assert_eq!(format_date(date), "5/1/2025");
    }

    #[test]
    fn test_render_card() {
        assert_eq!(render_card("Pendientes", "$0", None), "▸ Pendientes: $0");
        assert_eq!(
            render_card("Total Clientes", "3", Some("2 conectados")),
            "▸ Total Clientes: 3 (2 conectados)"
        );
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 10), "[█████░░░░░] 50.0%");
        assert_eq!(format_bar(150.0, 4), "[████] 150.0%");
        assert_eq!(format_bar(-10.0, 4), "[░░░░] -10.0%");
    }

    #[test]
    fn test_payments_table_lists_every_row() {
        let payments = seed_payments();
        let refs: Vec<_> = payments.iter().collect();
        let table = render_payments_table(&refs);

        assert_eq!(table.lines().count(), payments.len() + 1);
        assert!(table.contains("PAY-004"));
        assert!(table.contains("$12.000"));
        assert!(table.contains("Fallido"));
    }

    #[test]
    fn test_empty_payments_table() {
        assert_eq!(render_payments_table(&[]), "No se encontraron pagos");
    }

    #[test]
    fn test_status_chart_shows_only_present_statuses() {
        let payments: Vec<_> = seed_payments().into_iter().take(2).collect();
        let chart = render_status_chart(&status_distribution(&compute_totals(&payments)));
        assert!(chart.contains("Aprobado"));
        assert!(chart.contains("Pendiente"));
        assert!(!chart.contains("Fallido"));
        assert!(!chart.contains("Cancelado"));
    }

    #[test]
    fn test_clients_table_hides_tokens() {
        let table = render_clients_table(&seed_clients());
        assert!(table.contains("Empresa Demo SA"));
        assert!(table.contains("15/1/2025, 10:30:00"));
        assert!(!table.contains("APP_USR"));
    }

    #[test]
    fn test_client_chart() {
        let chart = render_client_chart(&client_chart_rows(&seed_clients()));
        assert!(chart.starts_with("Estadísticas por Cliente"));
        assert!(chart.contains("Servicios Pro"));
        assert!(chart.contains("$98.500"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("Membresía Premium", 8), "Membres…");
    }
}
