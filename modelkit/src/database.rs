//! Database connection bootstrap
//!
//! Turns a [`DatabaseConfig`] into a pooled SeaORM `DatabaseConnection`.
//! Every facade operation takes the connection (or a transaction) as its
//! first argument.
//!
//! # Example
//!
//! ```rust,ignore
//! use modelkit::{database, DatabaseConfig};
//!
//! let db = database::connect(&DatabaseConfig::from_env()).await?;
//! let users = users::Entity::get_all(&db, FindOptions::new()).await?;
//! ```

use std::path::Path;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::config::DatabaseConfig;
use crate::error::ModelError;

/// Connect to the database described by `config`
///
/// For SQLite file URLs the parent directory is created and the file is
/// opened in create mode. An in-memory SQLite database only lives as long
/// as its connection, so the pool is pinned to a single connection.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    let url = sqlite_file_url(&config.url).unwrap_or_else(|| config.url.clone());

    let mut opt = ConnectOptions::new(url);
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(config.logging);

    if config.is_memory() {
        opt.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opt).await?;

    tracing::info!(
        backend = ?conn.get_database_backend(),
        max_connections = if config.is_memory() { 1 } else { config.max_connections },
        "database connected"
    );

    Ok(conn)
}

/// Rewrite `sqlite://path` into the form SQLite opens in create mode
fn sqlite_file_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.trim_start_matches("./");

    if path.starts_with(":memory:") {
        return None;
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "could not create database directory");
            }
        }
    }

    Some(format!("sqlite:{}?mode=rwc", path))
}
