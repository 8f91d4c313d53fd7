use std::time::Duration;

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{debug, info, instrument, warn};

use crate::config::{DbConnectConfig, DbOptionsConfig};

/// Opens `count` connections up front so the first requests skip the
/// handshake.
async fn prewarm_pool(pool: &Pool, count: u32) {
    debug!("Pre-warming pool with {} connections", count);
    let mut held = Vec::with_capacity(count as usize);

    for i in 0..count {
        match pool.get().await {
            Ok(conn) => held.push(conn),
            Err(e) => {
                warn!("Failed to pre-warm connection {}: {}", i + 1, e);
                break;
            }
        }
    }
    drop(held);

    info!(
        "Pool pre-warming complete: {} connections available",
        pool.status().available
    );
}

#[instrument(skip_all, name = "connect-pgsql")]
pub async fn connect_postgres_db<C>(config: &C) -> Result<Pool, anyhow::Error>
where
    C: DbConnectConfig + DbOptionsConfig,
{
    let db_url = config.uri();

    info!(
        postgres.max_conn = ?config.max_conn(),
        postgres.min_conn = ?config.min_conn(),
        postgres.sql_logger = config.sql_logger()
    );

    let pg_config = db_url.parse::<tokio_postgres::Config>()?;

    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

    let mut pool_builder = Pool::builder(mgr)
        .runtime(deadpool_postgres::Runtime::Tokio1)
        .wait_timeout(Some(Duration::from_millis(2000)))
        .create_timeout(Some(Duration::from_millis(5000)))
        .recycle_timeout(Some(Duration::from_millis(100)));

    if let Some(max_conn) = config.max_conn() {
        pool_builder = pool_builder.max_size(max_conn as usize);
    }

    let pool = pool_builder.build()?;

    if let Some(min_conn) = config.min_conn() {
        prewarm_pool(&pool, min_conn).await;
    }

    Ok(pool)
}
