use deadpool_postgres::{Object, Pool};

/// Cheap, cloneable handle to the primary connection pool.
#[derive(Debug, Clone)]
pub struct SqlConnect {
    pool: Pool,
    log_sql: bool,
}

impl SqlConnect {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            log_sql: false,
        }
    }

    /// Enables per-statement `debug!` logging in the DAOs using this handle.
    pub fn with_sql_logging(mut self, log_sql: bool) -> Self {
        self.log_sql = log_sql;
        self
    }

    pub fn sql_logging(&self) -> bool { self.log_sql }

    pub async fn get_client(
        &self,
    ) -> Result<Object, deadpool_postgres::PoolError> {
        self.pool.get().await
    }

    /// Returns `(available, size)` for monitoring
    pub fn get_pool_status(&self) -> (usize, usize) {
        let status = self.pool.status();
        (status.available, status.size)
    }
}

#[cfg(test)]
mod tests {
    use deadpool_postgres::{Manager, ManagerConfig, RecyclingMethod};
    use tokio_postgres::NoTls;

    use super::*;

    fn unconnected_pool() -> Pool {
        let pg_config = "postgresql://postgres@localhost/postgres"
            .parse::<tokio_postgres::Config>()
            .unwrap();
        let mgr = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        Pool::builder(mgr).max_size(1).build().unwrap()
    }

    #[test]
    fn test_sql_logging_is_off_by_default() {
        let db = SqlConnect::new(unconnected_pool());
        assert!(!db.sql_logging());
    }

    #[test]
    fn test_sql_logging_follows_config() {
        let db = SqlConnect::new(unconnected_pool()).with_sql_logging(true);
        assert!(db.sql_logging());
        assert!(db.clone().sql_logging());
        assert_eq!(db.get_pool_status(), (0, 0));
    }
}
