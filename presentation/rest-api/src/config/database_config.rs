use std::env;
use std::time::Duration;

use persistence::db::{Database, DatabaseConfig};

use super::error::ConfigError;

const DEFAULT_MIGRATIONS_PATH: &str = "infrastructure/persistence/migrations";

/// Database settings read from the environment
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
/// - DATABASE_ACQUIRE_TIMEOUT_SECS: Seconds to wait for a connection (default: 30)
/// - DATABASE_MIGRATIONS_PATH: Migrations directory (default: "infrastructure/persistence/migrations")
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub connection: DatabaseConfig,
    pub migrations_path: String,
}

impl DatabaseSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::MissingVariable("DATABASE_URL"))?;
        let mut connection = DatabaseConfig::new(url);

        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            connection.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", raw)?;
        }
        if let Some(raw) = lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            connection.acquire_timeout =
                Duration::from_secs(parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", raw)?);
        }

        Ok(Self {
            connection,
            migrations_path: lookup("DATABASE_MIGRATIONS_PATH")
                .unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string()),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVariable { name, value: raw })
}

/// Connects the pool and applies pending migrations
///
/// # Errors
/// Returns error if configuration is missing, the connection fails or a migration fails
pub async fn init_database() -> anyhow::Result<Database> {
    let settings = DatabaseSettings::from_env()?;
    let database = Database::connect(&settings.connection).await?;
    database.migrate(&settings.migrations_path).await?;
    Ok(database)
}
