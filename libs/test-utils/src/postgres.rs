use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::{
    Manager, ManagerConfig, Pool as PostgresPool, RecyclingMethod,
};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};
use tokio_postgres::NoTls;
use tracing::debug;

const EVENTS_SCHEMA_SQL: &str =
    include_str!("../../../domains/events/dao/sql/001_create_events.sql");

/// PostgreSQL test container using testcontainers-rs
pub struct TestPostgresContainer {
    pub pool: PostgresPool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    /// Starts a fresh PostgreSQL container on a random port, waits until it
    /// accepts queries and creates the `events` schema.
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string = format!(
            "postgresql://testuser:testpass@{host}:{port}/testdb"
        );

        let pool = Self::create_pool(&connection_string).await?;

        let instance = Self {
            pool,
            connection_string,
            _container: container,
        };

        instance
            .execute_batch(EVENTS_SCHEMA_SQL)
            .await
            .context("Failed to create events schema")?;

        Ok(instance)
    }

    async fn create_pool(connection_string: &str) -> Result<PostgresPool> {
        let pg_config =
            connection_string.parse::<tokio_postgres::Config>()?;

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

        let pool = PostgresPool::builder(mgr)
            .max_size(10)
            .build()
            .context("Failed to build PostgreSQL connection pool")?;

        let mut attempts = 0;
        loop {
            let ready = match pool.get().await {
                Ok(client) => client.query_one("SELECT 1", &[]).await.is_ok(),
                Err(_) => false,
            };
            if ready {
                break;
            }
            if attempts >= 20 {
                anyhow::bail!("PostgreSQL not ready after {attempts} attempts");
            }
            attempts += 1;
            debug!(attempts, "waiting for PostgreSQL");
            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        Ok(pool)
    }

    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .execute(sql, &[])
            .await
            .context("Failed to execute SQL")?;
        Ok(())
    }

    pub async fn execute_batch(&self, sql: &str) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(sql)
            .await
            .context("Failed to execute SQL batch")?;
        Ok(())
    }
}
