//! Terminal surface - argument parsing and command dispatch.
//!
//! Each invocation plays one user intent against freshly loaded page
//! controllers and returns the text to print.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::{
    config::AppConfig,
    core::{
        payment::PaymentStatus,
        payment_link::SimulatedOutcome,
        role::{Role, Route},
        seed,
        stats::PaymentFilter,
        storage::KeyValueStore,
    },
    dashboard::{AdminDashboard, AdminTab, ClientDashboard, LoginPage},
    errors::Result,
};

/// Payment-link dashboard simulator
#[derive(Debug, Parser)]
#[command(name = "paylink-dashboard", version, about)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select a role and show where it leads
    Login {
        /// `client` or `admin`
        role: Role,
    },
    /// Forget the selected role
    Logout,
    /// Show the screen the stored role leads to
    Route,
    /// Client dashboard actions
    #[command(subcommand)]
    Client(ClientCommand),
    /// Admin dashboard actions
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Wipe every locally stored value
    Reset,
}

/// Client dashboard actions.
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Show stat cards, chart and payments table
    Show(ShowArgs),
    /// Generate a payment link and record its payment
    Create(CreateArgs),
    /// Show one payment
    Details {
        /// Payment id, e.g. PAY-001
        id: String,
    },
    /// Export the payments
    Export {
        /// Output format
        format: ExportArg,
    },
}

/// Filters of the payments table.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Search contact, description or id
    #[arg(long)]
    pub search: Option<String>,
    /// Only show payments with this status
    #[arg(long)]
    pub status: Option<PaymentStatus>,
}

/// Fields of the payment-link form.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Payer name
    #[arg(long, default_value = "")]
    pub contact: String,
    /// Payment concept
    #[arg(long, default_value = "")]
    pub description: String,
    /// Amount
    #[arg(long, default_value = "")]
    pub amount: String,
    /// Play a demonstration outcome right after generating the link
    #[arg(long)]
    pub simulate: Option<SimulateArg>,
}

/// Admin dashboard actions.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Show the overview and one tab
    Show {
        /// Tab to show
        #[arg(long, value_enum, default_value_t = TabArg::Clients)]
        tab: TabArg,
    },
    /// Export the clients table as CSV
    Export,
    /// Generate an invite link
    Invite,
}

/// Export format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportArg {
    /// Comma-separated values
    Csv,
    /// Pretty JSON
    Json,
}

/// Admin tab argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    /// Registered clients table
    Clients,
    /// Per-client statistics chart
    Payments,
    /// Reconciliation placeholder
    Reconciliation,
    /// Application settings
    Settings,
}

impl From<TabArg> for AdminTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Clients => Self::Clients,
            TabArg::Payments => Self::Payments,
            TabArg::Reconciliation => Self::Reconciliation,
            TabArg::Settings => Self::Settings,
        }
    }
}

/// Demonstration outcome argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SimulateArg {
    /// Mark the payment approved
    Approved,
    /// Mark the payment cancelled
    Cancelled,
}

impl From<SimulateArg> for SimulatedOutcome {
    fn from(value: SimulateArg) -> Self {
        match value {
            SimulateArg::Approved => Self::Approved,
            SimulateArg::Cancelled => Self::Cancelled,
        }
    }
}

/// Runs one command and returns the text to print.
#[instrument(skip(config, store))]
pub async fn execute<S>(command: Command, config: &AppConfig, store: &S) -> Result<String>
where
    S: KeyValueStore + Sync,
{
    match command {
        Command::Login { role } => {
            let mut login = LoginPage::load(store).await;
            let route = login.select_role(role).await;
            Ok(format!("Rol seleccionado: {role} → {}", route.path()))
        }
        Command::Logout => {
            let mut login = LoginPage::load(store).await;
            login.logout().await;
            Ok("Sesión cerrada".to_string())
        }
        Command::Route => {
            let login = LoginPage::load(store).await;
            Ok(match login.route() {
                Route::Landing => login.render(),
                route => format!("Ruta actual: {}", route.path()),
            })
        }
        Command::Client(command) => execute_client(command, config, store).await,
        Command::Admin(command) => execute_admin(command, config),
        Command::Reset => {
            store.clear().await?;
            info!("Local store cleared");
            Ok("Datos locales borrados".to_string())
        }
    }
}

async fn execute_client<S>(command: ClientCommand, config: &AppConfig, store: &S) -> Result<String>
where
    S: KeyValueStore + Sync,
{
    let mut dashboard = ClientDashboard::load(store, &config.dashboard, &seed::seed_payments()).await;

    match command {
        ClientCommand::Show(args) => {
            let filter = PaymentFilter {
                search: args.search,
                status: args.status,
            };
            Ok(dashboard.render(&filter))
        }
        ClientCommand::Create(args) => {
            let created = dashboard
                .create_payment(&args.contact, &args.description, &args.amount)
                .await?;
            let mut out = format!(
                "Link generado: {}\nPago {} registrado como pendiente",
                created.link, created.payment.id
            );
            if let Some(outcome) = args.simulate {
                let updated = dashboard.simulate(outcome.into()).await?;
                out.push_str(&format!("\nSimulación: pago {} → {}", updated.id, updated.status));
            }
            Ok(out)
        }
        ClientCommand::Details { id } => dashboard.payment_details(&id),
        ClientCommand::Export { format } => {
            let path = match format {
                ExportArg::Csv => dashboard.export_csv()?,
                ExportArg::Json => dashboard.export_json()?,
            };
            Ok(format!("Exportado a {}", path.display()))
        }
    }
}

fn execute_admin(command: AdminCommand, config: &AppConfig) -> Result<String> {
    let dashboard = AdminDashboard::new(
        seed::seed_clients(),
        seed::seed_payments(),
        config.dashboard.clone(),
    );

    match command {
        AdminCommand::Show { tab } => Ok(dashboard.render(tab.into())),
        AdminCommand::Export => {
            let path = dashboard.export_clients()?;
            Ok(format!("Exportado a {}", path.display()))
        }
        AdminCommand::Invite => Ok(format!(
            "Link de invitación: {}",
            dashboard.generate_invite_link()
        )),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::errors::Error;
    use crate::test_utils::test_config;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("paylink-dashboard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_client_show_with_filters() {
        let cli = parse(&["client", "show", "--search", "curso", "--status", "failed"]);
        let Command::Client(ClientCommand::Show(args)) = cli.command else {
            panic!("expected client show");
        };
        assert_eq!(args.search.as_deref(), Some("curso"));
        assert_eq!(args.status, Some(PaymentStatus::Failed));
    }

    #[test]
    fn test_parse_admin_tab() {
        let Command::Admin(AdminCommand::Show { tab }) = parse(&["admin", "show"]).command else {
            panic!("expected admin show");
        };
        assert_eq!(AdminTab::from(tab), AdminTab::Clients);

        let Command::Admin(AdminCommand::Show { tab }) =
            parse(&["admin", "show", "--tab", "settings"]).command
        else {
            panic!("expected admin show");
        };
        assert_eq!(AdminTab::from(tab), AdminTab::Settings);
    }

    #[test]
    fn test_parse_rejects_unknown_role() {
        let result = Cli::try_parse_from(["paylink-dashboard", "login", "root"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_login_then_route() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = MemoryStore::new();

        let out = execute(parse(&["login", "admin"]).command, &config, &store).await?;
        assert!(out.ends_with("/admin"));

        let out = execute(parse(&["route"]).command, &config, &store).await?;
        assert_eq!(out, "Ruta actual: /admin");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_simulation_persists_status() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = MemoryStore::new();

        let command = parse(&[
            "client", "create", "--contact", "Lucía", "--description", "Taller", "--amount", "1500",
            "--simulate", "approved",
        ])
        .command;
        let out = execute(command, &config, &store).await?;
        assert!(out.contains("https://mpago.la/"));
        assert!(out.contains("→ approved"));

        let out = execute(parse(&["client", "show", "--search", "lucía"]).command, &config, &store).await?;
        assert!(out.contains("Aprobado"));
        assert!(out.contains("$1.500"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = MemoryStore::new();

        let command = parse(&["client", "create", "--contact", "Lucía", "--amount", "10"]).command;
        let result = execute(command, &config, &store).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[tokio::test]
    async fn test_dashboards_ignore_stored_role() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = MemoryStore::new();

        execute(parse(&["login", "client"]).command, &config, &store).await?;
        let out = execute(parse(&["admin", "show"]).command, &config, &store).await?;
        assert!(out.starts_with("Panel de Administración"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_clears_store() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = MemoryStore::new();

        execute(parse(&["login", "client"]).command, &config, &store).await?;
        execute(parse(&["reset"]).command, &config, &store).await?;
        let out = execute(parse(&["route"]).command, &config, &store).await?;
        assert!(out.contains("Rol actual: ninguno"));
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_export_and_invite() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = MemoryStore::new();

        let out = execute(parse(&["admin", "export"]).command, &config, &store).await?;
        assert!(out.contains("clientes.csv"));
        assert!(dir.path().join("clientes.csv").exists());

        let out = execute(parse(&["admin", "invite"]).command, &config, &store).await?;
        assert!(out.starts_with("Link de invitación: https://app.integracion.com/invite/"));
        Ok(())
    }
}
