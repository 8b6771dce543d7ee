use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::db::readonly::validate_readonly;
use crate::db::{Database, DbError, ResultSet};
use crate::error::PipelineError;
use crate::render::Presenter;

/// Runs generated SQL exactly as given.
///
/// Nothing stops a mutating statement unless `read_only` is set.
pub struct QueryExecutor {
    database: Arc<dyn Database>,
    read_only: bool,
}

impl QueryExecutor {
    pub fn new(database: Arc<dyn Database>, read_only: bool) -> Self {
        Self {
            database,
            read_only,
        }
    }

    pub async fn execute(&self, sql: &str) -> Result<ResultSet, PipelineError> {
        if self.read_only {
            validate_readonly(sql).map_err(PipelineError::Rejected)?;
        }

        let start_time = Instant::now();
        debug!("Executing on {}: {}", self.database.describe(), sql);

        let result = self
            .database
            .query(sql)
            .await
            .map_err(|e: DbError| PipelineError::Execution(e.to_string()))?;

        info!(
            "Query executed successfully. Row count: {}, Execution time: {}ms",
            result.row_count(),
            start_time.elapsed().as_millis()
        );
        Ok(result)
    }

    /// Reports a failure through `presenter` and returns an empty result
    /// instead of an error.
    pub async fn execute_or_empty(&self, sql: &str, presenter: &mut dyn Presenter) -> ResultSet {
        match self.execute(sql).await {
            Ok(result) => result,
            Err(e) => {
                error!("Query failed: {}", e);
                presenter.show_error(&e.to_string());
                ResultSet::default()
            }
        }
    }
}
