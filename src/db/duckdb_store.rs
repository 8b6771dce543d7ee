//! Local DuckDB file backend.
//!
//! DuckDB connections are blocking, so each call runs on the blocking pool
//! and opens the database file for the duration of that call only.

use async_trait::async_trait;
use duckdb::Connection;
use duckdb::types::{TimeUnit, Value};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::db::{Database, DbError, ResultSet};

pub struct DuckDbDatabase {
    path: String,
}

impl DuckDbDatabase {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    async fn with_connection<T, F>(&self, work: F) -> Result<T, DbError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, duckdb::Error> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<T, DbError> {
            let conn = Connection::open(&path).map_err(|e| DbError::Connection(e.to_string()))?;
            let result = work(&conn).map_err(|e| DbError::Query(e.to_string()));
            if let Err((_, e)) = conn.close() {
                debug!("Error closing DuckDB connection to {}: {}", path, e);
            }
            result
        })
        .await
        .map_err(|e| DbError::Task(e.to_string()))?
    }
}

#[async_trait]
impl Database for DuckDbDatabase {
    fn describe(&self) -> String {
        format!("duckdb:{}", self.path)
    }

    async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SHOW TABLES")?;
            let tables = stmt.query_map([], |row| row.get::<_, String>(0))?;
            tables.collect()
        })
        .await
    }

    async fn query(&self, sql: &str) -> Result<ResultSet, DbError> {
        let sql = sql.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let columns = rows
                .as_ref()
                .map(|stmt| stmt.column_names())
                .unwrap_or_default();

            let mut result = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(columns.len());
                for idx in 0..columns.len() {
                    values.push(to_json(row.get::<_, Value>(idx)?));
                }
                result.push(values);
            }

            Ok(ResultSet::new(columns, result))
        })
        .await
    }
}

fn to_json(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(b),
        Value::TinyInt(v) => v.into(),
        Value::SmallInt(v) => v.into(),
        Value::Int(v) => v.into(),
        Value::BigInt(v) => v.into(),
        Value::UTinyInt(v) => v.into(),
        Value::USmallInt(v) => v.into(),
        Value::UInt(v) => v.into(),
        Value::UBigInt(v) => v.into(),
        Value::HugeInt(v) => i64::try_from(v)
            .map(JsonValue::from)
            .unwrap_or_else(|_| JsonValue::String(v.to_string())),
        Value::Float(v) => float_to_json(v as f64),
        Value::Double(v) => float_to_json(v),
        Value::Decimal(d) => JsonValue::String(d.to_string()),
        Value::Text(s) | Value::Enum(s) => JsonValue::String(s),
        Value::Blob(bytes) => JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Date32(days) => chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0)
            .map(|dt| JsonValue::String(dt.date_naive().to_string()))
            .unwrap_or(JsonValue::Null),
        Value::Timestamp(unit, raw) => to_micros(unit, raw)
            .and_then(chrono::DateTime::from_timestamp_micros)
            .map(|dt| JsonValue::String(dt.naive_utc().to_string()))
            .unwrap_or(JsonValue::Null),
        other => JsonValue::String(format!("{:?}", other)),
    }
}

/// `None` when the value does not fit in microseconds.
fn to_micros(unit: TimeUnit, raw: i64) -> Option<i64> {
    match unit {
        TimeUnit::Second => raw.checked_mul(1_000_000),
        TimeUnit::Millisecond => raw.checked_mul(1_000),
        TimeUnit::Microsecond => Some(raw),
        TimeUnit::Nanosecond => Some(raw / 1_000),
    }
}

fn float_to_json(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}
