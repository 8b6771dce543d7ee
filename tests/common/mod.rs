#![allow(dead_code)]

use async_trait::async_trait;
use nl_sql_assistant::db::duckdb_store::DuckDbDatabase;
use nl_sql_assistant::db::{Database, DbError, ResultSet};
use nl_sql_assistant::llm::{LlmError, TextGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Text generator that always answers with the same reply.
pub struct CannedModel {
    reply: Result<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl CannedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl TextGenerator for CannedModel {
    async fn generate(&self, _prompt: &str, _question: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(LlmError::ResponseError)
    }
}

/// In-memory database double that records every call.
pub struct FakeDatabase {
    pub tables: Result<Vec<String>, String>,
    pub result: Result<ResultSet, String>,
    pub list_calls: AtomicUsize,
    pub executed: Mutex<Vec<String>>,
}

impl Default for FakeDatabase {
    fn default() -> Self {
        Self {
            tables: Ok(Vec::new()),
            result: Ok(ResultSet::default()),
            list_calls: AtomicUsize::new(0),
            executed: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDatabase {
    /// Table listing fails with `message`; queries would succeed.
    pub fn failing_tables(message: &str) -> Self {
        Self {
            tables: Err(message.to_string()),
            ..Default::default()
        }
    }

    pub fn new(tables: &[&str], result: Result<ResultSet, &str>) -> Self {
        Self {
            tables: Ok(tables.iter().map(|t| t.to_string()).collect()),
            result: result.map_err(str::to_string),
            ..Default::default()
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Database for FakeDatabase {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.tables.clone().map_err(DbError::Connection)
    }

    async fn query(&self, sql: &str) -> Result<ResultSet, DbError> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.result.clone().map_err(DbError::Query)
    }
}

/// A DuckDB file holding the sales table with one row, plus a logs table.
pub fn sales_database() -> (tempfile::TempDir, Arc<DuckDbDatabase>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.duckdb");
    let conn = duckdb::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE sales_data (
             sale_date DATE,
             Channel VARCHAR,
             Product_Name VARCHAR,
             City VARCHAR,
             Quantity INTEGER,
             Sales DOUBLE
         );
         INSERT INTO sales_data VALUES ('2024-01-01', 'Web', 'Widget', 'NYC', 3, 29.97);
         CREATE TABLE logs (message VARCHAR);",
    )
    .unwrap();
    drop(conn);

    let database = Arc::new(DuckDbDatabase::new(path.to_string_lossy().to_string()));
    (dir, database)
}
