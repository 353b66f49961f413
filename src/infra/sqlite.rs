/// SQLite integration

use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DbConfig;
use crate::repository::StoreError;

/// Handle to the backing database: a connection pool plus the one-shot
/// schema initialization flag. Cloning shares both.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
    schema_applied: Arc<AtomicBool>,
}

impl Storage {
    pub async fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = config.database_url.contains(":memory:")
            || config.database_url.contains("mode=memory");

        // An in-memory database lives and dies with its connection, so the
        // pool must hold exactly one and never recycle it.
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { config.max_connections })
            .acquire_timeout(Duration::from_millis(config.connect_timeout_ms));
        if in_memory {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        tracing::info!(
            database_url = %config.database_url,
            max_connections = %config.max_connections,
            "SQLite pool initialized"
        );

        Ok(Self {
            pool,
            schema_applied: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Execute the schema script statement by statement. Idempotent: once
    /// a handle (or any clone of it) has applied the schema, later calls
    /// are no-ops.
    pub async fn init_schema(&self, schema_path: &Path) -> Result<(), StoreError> {
        if self.schema_applied.load(Ordering::SeqCst) {
            return Ok(());
        }

        let script = tokio::fs::read_to_string(schema_path).await?;
        for statement in script.split(';') {
            if is_blank(statement) {
                continue;
            }
            sqlx::query(statement).execute(&self.pool).await?;
        }

        self.schema_applied.store(true, Ordering::SeqCst);
        tracing::info!(schema = %schema_path.display(), "schema applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn check_health(&self) -> Result<(), String> {
        match sqlx::query("SELECT 1").fetch_one(&self.pool).await {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("SQLite health check failed: {}", e)),
        }
    }
}

/// Whitespace and `--` comments only: nothing for SQLite to prepare.
fn is_blank(statement: &str) -> bool {
    statement
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with("--"))
}
