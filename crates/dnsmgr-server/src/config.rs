//! Command-line and environment configuration.

use clap::Parser;
use dnsmgr_db::DbConfig;

#[derive(Parser, Clone, Debug)]
#[command(name = "dnsmgr", about = "Prepare the dnsmgr SurrealDB store")]
pub struct Config {
    /// SurrealDB WebSocket address
    #[arg(long, default_value = "127.0.0.1:8000", env = "DNSMGR_DB_URL")]
    pub db_url: String,

    /// SurrealDB namespace
    #[arg(long, default_value = "dnsmgr", env = "DNSMGR_DB_NAMESPACE")]
    pub db_namespace: String,

    /// SurrealDB database name
    #[arg(long, default_value = "main", env = "DNSMGR_DB_DATABASE")]
    pub db_database: String,

    /// Root username
    #[arg(long, default_value = "root", env = "DNSMGR_DB_USERNAME")]
    pub db_username: String,

    /// Root password
    #[arg(long, default_value = "root", env = "DNSMGR_DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,
}

impl Config {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_username.clone(),
            password: self.db_password.clone(),
        }
    }
}
