use clap::Parser;
use dotenvy::dotenv;
use paylink_dashboard::{
    cli::{self, Cli},
    config::{self, database},
    core::storage::SqliteStore,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load dashboard settings
    let app_config = config::load_config_or_default(&cli.config)
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;
    info!("Configuration loaded");

    // 4. Open the local store
    let db = database::connect(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to open local store: {e}"))?;
    let store = SqliteStore::new(db);

    // 5. Run the requested command
    let output = cli::execute(cli.command, &app_config, &store)
        .await
        .inspect_err(|e| error!("{e}"))?;
    println!("{output}");

    Ok(())
}
