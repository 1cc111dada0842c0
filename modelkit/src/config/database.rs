use crate::config::env::env;

/// Database backend, derived from the connection URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Postgres,
    Sqlite,
}

impl DatabaseType {
    /// Detect the backend from a URL, defaulting to SQLite for unknown schemes
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Self::Postgres
        } else {
            Self::Sqlite
        }
    }
}

/// Database connection configuration
///
/// # Environment Variables
///
/// - `DATABASE_URL` - Connection URL (default: `sqlite::memory:`)
/// - `DB_MAX_CONNECTIONS` - Pool upper bound (default: 10)
/// - `DB_MIN_CONNECTIONS` - Pool lower bound (default: 1)
/// - `DB_CONNECT_TIMEOUT` - Connect timeout in seconds (default: 30)
/// - `DB_LOGGING` - Let SeaORM log every statement (default: false)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds
    pub connect_timeout: u64,
    pub logging: bool,
}

impl DatabaseConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            url: env("DATABASE_URL", "sqlite::memory:".to_string()),
            max_connections: env("DB_MAX_CONNECTIONS", 10),
            min_connections: env("DB_MIN_CONNECTIONS", 1),
            connect_timeout: env("DB_CONNECT_TIMEOUT", 30),
            logging: env("DB_LOGGING", false),
        }
    }

    /// Create a builder for customizing config
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }

    /// Backend the URL points at
    pub fn database_type(&self) -> DatabaseType {
        DatabaseType::from_url(&self.url)
    }

    /// Check if the URL points at an in-memory SQLite database
    pub fn is_memory(&self) -> bool {
        self.database_type() == DatabaseType::Sqlite && self.url.contains(":memory:")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builder for DatabaseConfig
///
/// Unset fields fall back to the environment.
#[derive(Default)]
pub struct DatabaseConfigBuilder {
    url: Option<String>,
    max_connections: Option<u32>,
    min_connections: Option<u32>,
    connect_timeout: Option<u64>,
    logging: Option<bool>,
}

impl DatabaseConfigBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = Some(min);
        self
    }

    /// Connect timeout in seconds
    pub fn connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout = Some(secs);
        self
    }

    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = Some(enabled);
        self
    }

    pub fn build(self) -> DatabaseConfig {
        let default = DatabaseConfig::from_env();
        DatabaseConfig {
            url: self.url.unwrap_or(default.url),
            max_connections: self.max_connections.unwrap_or(default.max_connections),
            min_connections: self.min_connections.unwrap_or(default.min_connections),
            connect_timeout: self.connect_timeout.unwrap_or(default.connect_timeout),
            logging: self.logging.unwrap_or(default.logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_win() {
        let config = DatabaseConfig::builder()
            .url("postgres://localhost/app")
            .max_connections(3)
            .min_connections(2)
            .connect_timeout(5)
            .logging(true)
            .build();

        assert_eq!(config.url, "postgres://localhost/app");
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout, 5);
        assert!(config.logging);
        assert_eq!(config.database_type(), DatabaseType::Postgres);
        assert!(!config.is_memory());
    }

    #[test]
    fn test_database_type_detection() {
        assert_eq!(DatabaseType::from_url("postgresql://db/x"), DatabaseType::Postgres);
        assert_eq!(DatabaseType::from_url("sqlite://./data.db"), DatabaseType::Sqlite);
        assert_eq!(DatabaseType::from_url("sqlite::memory:"), DatabaseType::Sqlite);
    }

    #[test]
    fn test_memory_detection() {
        let config = DatabaseConfig::builder().url("sqlite::memory:").build();
        assert!(config.is_memory());

        let config = DatabaseConfig::builder().url("sqlite://./data.db").build();
        assert!(!config.is_memory());
    }
}
