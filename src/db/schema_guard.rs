use std::sync::Arc;
use tracing::{error, info, warn};

use crate::db::{Database, DbError};
use crate::error::PipelineError;
use crate::render::Presenter;

/// Checks that the table generated SQL is written against exists before
/// anything runs.
///
/// The check is by name only. It does not look at which tables the SQL
/// actually references.
pub struct SchemaGuard {
    database: Arc<dyn Database>,
    expected_table: String,
}

impl SchemaGuard {
    pub fn new(database: Arc<dyn Database>, expected_table: impl Into<String>) -> Self {
        Self {
            database,
            expected_table: expected_table.into(),
        }
    }

    pub fn expected_table(&self) -> &str {
        &self.expected_table
    }

    /// Table names as the database lists them, fetched fresh on every call.
    pub async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        let tables = self.database.list_tables().await?;
        info!("Found {} tables in {}: {:?}", tables.len(), self.database.describe(), tables);
        Ok(tables)
    }

    /// Reports a failure through `presenter` and returns an empty list
    /// instead of an error.
    pub async fn list_tables_or_empty(&self, presenter: &mut dyn Presenter) -> Vec<String> {
        match self.list_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                error!("Failed to list tables: {}", e);
                presenter.show_error(&format!("Error while listing tables: {}", e));
                Vec::new()
            }
        }
    }

    pub async fn ensure_expected_table(&self) -> Result<(), PipelineError> {
        let tables = self
            .list_tables()
            .await
            .map_err(|e| PipelineError::Schema(e.to_string()))?;

        if tables.iter().any(|table| table == &self.expected_table) {
            Ok(())
        } else {
            warn!("Expected table '{}' is missing", self.expected_table);
            Err(PipelineError::TableMissing {
                table: self.expected_table.clone(),
            })
        }
    }
}
