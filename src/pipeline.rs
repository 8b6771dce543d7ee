//! Question → SQL → table check → execution, once per request.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{AppConfig, GuardConfig};
use crate::db::{self, Database, DbError, QueryExecutor, ResultSet, SchemaGuard};
use crate::error::PipelineError;
use crate::llm::{LlmError, QueryTranslator};
use crate::render::Presenter;

pub struct Pipeline {
    translator: Result<QueryTranslator, LlmError>,
    guard: SchemaGuard,
    executor: QueryExecutor,
}

/// What one request produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub question: String,
    /// Present whenever translation succeeded, even if a later step failed.
    pub sql: Option<String>,
    pub outcome: Result<ResultSet, PipelineError>,
}

impl Report {
    fn failed(question: &str, sql: Option<String>, error: PipelineError) -> Self {
        error!(kind = error.kind(), "Request failed: {}", error);
        Self {
            question: question.to_string(),
            sql,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Shows the SQL if there is any, then exactly one of the table, the
    /// "no data" notice, or the error.
    pub fn present(&self, presenter: &mut dyn Presenter) {
        if let Some(sql) = &self.sql {
            presenter.show_sql(sql);
        }
        match &self.outcome {
            Ok(result) if result.is_empty() => presenter.show_no_data(),
            Ok(result) => presenter.show_table(result),
            Err(e) => presenter.show_error(&e.to_string()),
        }
    }
}

impl Pipeline {
    /// A translator that failed to build is kept as-is; every request then
    /// fails with a configuration error instead of the process exiting.
    pub fn new(
        translator: Result<QueryTranslator, LlmError>,
        database: Arc<dyn Database>,
        guard: &GuardConfig,
    ) -> Self {
        Self {
            translator,
            guard: SchemaGuard::new(Arc::clone(&database), guard.expected_table.clone()),
            executor: QueryExecutor::new(database, guard.read_only),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DbError> {
        let database = db::from_config(&config.database)?;
        info!("Using database {}", database.describe());

        let translator = QueryTranslator::from_config(&config.llm);
        if let Err(e) = &translator {
            error!("Text generator unavailable: {}", e);
        }

        Ok(Self::new(translator, database, &config.guard))
    }

    pub fn startup_error(&self) -> Option<PipelineError> {
        self.translator
            .as_ref()
            .err()
            .map(|e| PipelineError::Configuration(e.to_string()))
    }

    pub fn guard(&self) -> &SchemaGuard {
        &self.guard
    }

    pub async fn run(&self, question: &str) -> Report {
        info!("Answering question: {}", question);

        let translator = match &self.translator {
            Ok(translator) => translator,
            Err(e) => {
                return Report::failed(question, None, PipelineError::Configuration(e.to_string()));
            }
        };

        let sql = match translator.translate(question).await {
            Ok(sql) if !sql.is_empty() => sql,
            Ok(_) => {
                return Report::failed(
                    question,
                    None,
                    PipelineError::Translation("the model returned no SQL".to_string()),
                );
            }
            Err(e) => {
                return Report::failed(question, None, PipelineError::Translation(e.to_string()));
            }
        };

        if let Err(e) = self.guard.ensure_expected_table().await {
            return Report::failed(question, Some(sql), e);
        }

        let outcome = self.executor.execute(&sql).await;
        match &outcome {
            Ok(result) if result.is_empty() => warn!("Query returned no rows"),
            Ok(result) => info!("Query returned {} rows", result.row_count()),
            Err(e) => error!(kind = e.kind(), "Request failed: {}", e),
        }

        Report {
            question: question.to_string(),
            sql: Some(sql),
            outcome,
        }
    }

    /// Runs the request and renders it.
    pub async fn answer(&self, question: &str, presenter: &mut dyn Presenter) -> Report {
        let report = self.run(question).await;
        report.present(presenter);
        report
    }
}
