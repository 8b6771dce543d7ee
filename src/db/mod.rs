pub mod duckdb_store;
pub mod executor;
pub mod mysql;
pub mod readonly;
pub mod schema_guard;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use executor::QueryExecutor;
pub use schema_guard::SchemaGuard;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Query(String),

    #[error("Database task failed: {0}")]
    Task(String),

    #[error("Database configuration error: {0}")]
    Config(String),
}

/// Rows and column names of one executed statement, in database order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<JsonValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A relational database reached with a fresh connection per call.
///
/// Implementations must not pool or cache: every call opens its own
/// connection and closes it before returning.
#[async_trait]
pub trait Database: Send + Sync {
    /// Human-readable target for logs, never containing credentials.
    fn describe(&self) -> String;

    async fn list_tables(&self) -> Result<Vec<String>, DbError>;

    /// Runs `sql` verbatim.
    async fn query(&self, sql: &str) -> Result<ResultSet, DbError>;
}

pub fn from_config(config: &DatabaseConfig) -> Result<Arc<dyn Database>, DbError> {
    let database: Arc<dyn Database> = match config.backend.as_str() {
        "mysql" => Arc::new(mysql::MySqlDatabase::new(config)),
        "duckdb" => {
            let path = config.path.clone().ok_or_else(|| {
                DbError::Config("database.path is required for the duckdb backend".to_string())
            })?;
            Arc::new(duckdb_store::DuckDbDatabase::new(path))
        }
        _ => {
            return Err(DbError::Config(format!(
                "Unsupported database backend: {}",
                config.backend
            )));
        }
    };

    Ok(database)
}
