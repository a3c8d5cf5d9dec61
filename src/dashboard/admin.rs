//! Admin dashboard - global overview across every client.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    config::DashboardConfig,
    core::{
        export::{self, ExportFormat},
        payment::{Client, Payment},
        payment_link,
        stats::{self, ClientChartRow, PaymentTotals},
    },
    errors::Result,
};

use super::views;

/// File stem of the client export.
pub const CLIENTS_EXPORT_FILENAME: &str = "clientes";

/// Sections of the admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    /// Registered clients table
    #[default]
    Clients,
    /// Per-client statistics chart
    Payments,
    /// Reconciliation placeholder
    Reconciliation,
    /// Application settings
    Settings,
}

/// Values shown on the settings tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSettings {
    /// Payment-processor application id with all but the last four characters hidden
    pub masked_app_id: String,
    /// OAuth callback URL
    pub callback_url: String,
}

/// Page controller of the admin view. Owns its injected seed records.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    clients: Vec<Client>,
    payments: Vec<Payment>,
    config: DashboardConfig,
}

impl AdminDashboard {
    /// Creates the controller over the given records.
    #[must_use]
    pub const fn new(clients: Vec<Client>, payments: Vec<Payment>, config: DashboardConfig) -> Self {
        Self {
            clients,
            payments,
            config,
        }
    }

    /// All clients.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Totals over every payment of every client.
    #[must_use]
    pub fn global_totals(&self) -> PaymentTotals {
        stats::compute_totals(&self.payments)
    }

    /// Number of registered clients.
    #[must_use]
    pub fn total_clients(&self) -> usize {
        self.clients.len()
    }

    /// Number of clients with a connected payment-processor account.
    #[must_use]
    pub fn connected_clients(&self) -> usize {
        stats::count_connected(&self.clients)
    }

    /// Rows of the per-client chart.
    #[must_use]
    pub fn chart_rows(&self) -> Vec<ClientChartRow> {
        stats::client_chart_rows(&self.clients)
    }

    /// Looks a client up by id (the table's "view" action).
    #[must_use]
    pub fn find_client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Payments of one client.
    #[must_use]
    pub fn client_payments(&self, client_id: &str) -> Vec<Payment> {
        stats::filter_by_client(&self.payments, client_id)
    }

    /// Writes the clients table as `clientes.csv`.
    pub fn export_clients(&self) -> Result<PathBuf> {
        let contents = export::clients_to_csv(&self.clients)?;
        export::save_export(
            Path::new(&self.config.export_dir),
            CLIENTS_EXPORT_FILENAME,
            ExportFormat::Csv,
            &contents,
        )
    }

    /// A fresh invite link for onboarding a client.
    #[must_use]
    pub fn generate_invite_link(&self) -> String {
        let link = payment_link::generate_invite_link(&self.config.invite_base_url);
        info!("Generated invite link {link}");
        link
    }

    /// Settings tab values.
    #[must_use]
    pub fn settings(&self) -> AdminSettings {
        AdminSettings {
            masked_app_id: mask_secret(&self.config.app_id),
            callback_url: self.config.callback_url.clone(),
        }
    }

    /// Full text of the admin view for one tab.
    #[must_use]
    pub fn render(&self, tab: AdminTab) -> String {
        let totals = self.global_totals();
        let connected = format!("{} conectados", self.connected_clients());
        let cards = [
            views::render_card(
                "Total Clientes",
                &self.total_clients().to_string(),
                Some(&connected),
            ),
            views::render_card("Facturación Total", &views::format_amount(totals.total), None),
            views::render_card("Aprobados", &views::format_amount(totals.approved), None),
            views::render_card("Pendientes", &views::format_amount(totals.pending), None),
        ];

        let mut out = String::from("Panel de Administración\n\n");
        out.push_str(&cards.join("\n"));
        out.push_str("\n\n");

        match tab {
            AdminTab::Clients => {
                out.push_str("Clientes Registrados\n");
                out.push_str(&views::render_clients_table(&self.clients));
            }
            AdminTab::Payments => {
                out.push_str(&views::render_client_chart(&self.chart_rows()));
            }
            AdminTab::Reconciliation => {
                out.push_str("Reconciliación de Pagos\n");
                out.push_str(
                    "Herramienta para comparar y sincronizar pagos entre GHL y Mercado Pago.\n\
                     Los datos son simulados: no se consulta ningún servicio externo.\n",
                );
            }
            AdminTab::Settings => {
                let settings = self.settings();
                out.push_str("Configuración de la Aplicación\n");
                out.push_str(&format!("  App ID Mercado Pago: {}\n", settings.masked_app_id));
                out.push_str(&format!("  Callback URL: {}\n", settings.callback_url));
            }
        }
        out
    }
}

/// Hides all but the last four characters.
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    let visible = count.min(4);
    let hidden = count - visible;
    let tail: String = secret.chars().skip(hidden).collect();
    format!("{}{tail}", "*".repeat(hidden))
}
