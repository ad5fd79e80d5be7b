//! NETINV Server — Application entry point.

use netinv_auth::DirectoryConfig;
use netinv_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("netinv=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting NETINV server...");

    let db_config = DbConfig::from_env();
    let directory_config = DirectoryConfig::from_env();
    tracing::info!(
        host = %directory_config.host,
        port = directory_config.port,
        domain = %directory_config.domain,
        "Directory authentication configured"
    );

    let manager = match DbManager::connect(&db_config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = netinv_db::run_migrations(manager.client()).await {
        tracing::error!(error = %e, "Schema migration failed");
        std::process::exit(1);
    }

    // TODO: Start REST API server

    tracing::info!("NETINV server stopped.");
}
