//! Disposable PostgreSQL databases for adapter tests.

use std::sync::LazyLock;

use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;
use uuid::Uuid;

const USER: &str = "shop_test";
const PASSWORD: &str = "shop_test_password";

/// Running server plus the address it was published on.
///
/// The address is resolved once at startup; later tests only talk to Postgres itself.
struct SharedPostgres {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

async fn init_postgres_container() -> SharedPostgres {
    let container = PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("shop_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");
    let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
        .unwrap_or_else(|_| "localhost".to_string());

    SharedPostgres {
        _container: container,
        host,
        port,
    }
}

/// One container per test binary; every `TestDb` gets its own database inside it.
static POSTGRES: LazyLock<OnceCell<SharedPostgres>> = LazyLock::new(OnceCell::new);

/// Freshly created and migrated database.
///
/// Isolation is database-level, so tests never see each other's rows.
pub struct TestDb {
    pub pool: PgPool,
}

impl TestDb {
    pub async fn new() -> Self {
        let SharedPostgres { host, port, .. } =
            POSTGRES.get_or_init(init_postgres_container).await;

        // Generated from a UUID, so always a valid identifier.
        let name = format!("shop_repo_test_{}", Uuid::new_v4().simple());

        let admin_url = format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/postgres");
        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to postgres database");
        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");
        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&format!(
            "postgresql://{USER}:{PASSWORD}@{host}:{port}/{name}"
        ))
        .await
        .expect("Failed to create pool for database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool }
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}
