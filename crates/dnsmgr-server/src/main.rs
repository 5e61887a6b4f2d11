//! dnsmgr: connects to SurrealDB and applies pending schema
//! migrations.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), dnsmgr_db::DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dnsmgr=info")),
        )
        .json()
        .init();

    let config = Config::parse();

    let manager = dnsmgr_db::DbManager::connect(&config.db_config()).await?;
    manager.migrate().await?;

    tracing::info!("Store is up to date");
    Ok(())
}
