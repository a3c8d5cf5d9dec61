//! Seed records for the simulator.
//!
//! These are handed to the page controllers as their initial state; nothing
//! here is global or mutable.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::payment::{Client, ConnectionStatus, Payment, PaymentStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_time(NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default())
}

fn payment(
    id: &str,
    issued: NaiveDate,
    contact: &str,
    description: &str,
    amount: f64,
    status: PaymentStatus,
    client_id: &str,
) -> Payment {
    Payment {
        id: id.to_string(),
        date: issued,
        contact: contact.to_string(),
        description: description.to_string(),
        amount,
        status,
        client_id: Some(client_id.to_string()),
    }
}

/// The three demo clients.
#[must_use]
pub fn seed_clients() -> Vec<Client> {
    vec![
        Client {
            id: "1".to_string(),
            name: "Empresa Demo SA".to_string(),
            email: "demo@empresa.com".to_string(),
            ghl_subaccount: "SUB-GHL-001".to_string(),
            mp_status: ConnectionStatus::Connected,
            total_payments: 125_000.0,
            approved: 98_500.0,
            pending: 26_500.0,
            last_update: timestamp(2025, 1, 15, 10, 30),
            mp_token: Some("APP_USR_1234567890abcdef".to_string()),
            ghl_token: Some("GHL_TOKEN_xyz789".to_string()),
        },
        Client {
            id: "2".to_string(),
            name: "Tienda Online XYZ".to_string(),
            email: "contacto@tiendaxyz.com".to_string(),
            ghl_subaccount: "SUB-GHL-002".to_string(),
            mp_status: ConnectionStatus::Connected,
            total_payments: 89_500.0,
            approved: 75_000.0,
            pending: 14_500.0,
            last_update: timestamp(2025, 1, 14, 15, 20),
            mp_token: Some("APP_USR_fedcba0987654321".to_string()),
            ghl_token: Some("GHL_TOKEN_abc123".to_string()),
        },
        Client {
            id: "3".to_string(),
            name: "Servicios Pro".to_string(),
            email: "info@serviciospro.com".to_string(),
            ghl_subaccount: "SUB-GHL-003".to_string(),
            mp_status: ConnectionStatus::Pending,
            total_payments: 45_000.0,
            approved: 30_000.0,
            pending: 15_000.0,
            last_update: timestamp(2025, 1, 13, 9, 15),
            mp_token: None,
            ghl_token: None,
        },
    ]
}

/// The eight demo payments across all clients, newest first.
#[must_use]
#[rustfmt::skip]
pub fn seed_payments() -> Vec<Payment> {
    use PaymentStatus::{Approved, Cancelled, Failed, Pending};

    vec![
        payment("PAY-001", date(2025, 1, 15), "Juan Pérez", "Membresía Premium - Enero", 15_000.0, Approved, "1"),
        payment("PAY-002", date(2025, 1, 15), "María González", "Consultoría estratégica", 35_000.0, Pending, "1"),
        payment("PAY-003", date(2025, 1, 14), "Carlos Rodríguez", "Producto Digital A", 8_500.0, Approved, "1"),
        payment("PAY-004", date(2025, 1, 14), "Ana Martínez", "Curso Online", 12_000.0, Failed, "1"),
        payment("PAY-005", date(2025, 1, 13), "Pedro Sánchez", "Suscripción mensual", 5_500.0, Approved, "2"),
        payment("PAY-006", date(2025, 1, 13), "Laura Fernández", "Asesoría personalizada", 25_000.0, Pending, "2"),
        payment("PAY-007", date(2025, 1, 12), "Diego Torres", "Pack de servicios", 18_000.0, Approved, "3"),
        payment("PAY-008", date(2025, 1, 12), "Sofía Ramírez", "Membresía anual", 45_000.0, Cancelled, "3"),
    ]
}
