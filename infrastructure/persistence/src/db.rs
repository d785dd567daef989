use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{path::Path, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError,
    #[error("database.migration_error")]
    MigrationError,
}

/// Configuration for the database connection
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default values
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Store handle shared by every repository.
///
/// Built once at startup and passed down explicitly; `close` drains the pool on shutdown.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Opens the PostgreSQL connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.connection_string)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "database connection failed");
                DatabaseError::ConnectionError
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    /// Runs database migrations from the specified directory
    pub async fn migrate(&self, migrations_path: &str) -> Result<(), DatabaseError> {
        let path = Path::new(migrations_path);

        if !path.exists() {
            tracing::error!(path = migrations_path, "migrations directory not found");
            return Err(DatabaseError::MigrationError);
        }

        sqlx::migrate::Migrator::new(path)
            .await
            .map_err(|_| DatabaseError::MigrationError)?
            .run(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "migration failed");
                DatabaseError::MigrationError
            })?;

        tracing::info!(path = migrations_path, "migrations applied");
        Ok(())
    }

    /// Round-trips a trivial query; used by the health endpoint.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
