//! Failure reasons for a single question-to-result request.
//!
//! Every stage of the pipeline maps its own error type into one of these
//! variants, so a caller can tell "the query failed" apart from "the query
//! returned nothing".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Error generating SQL: {0}")]
    Translation(String),

    #[error("Error while listing tables: {0}")]
    Schema(String),

    #[error("Error executing query: {0}")]
    Execution(String),

    #[error("Table '{table}' does not exist in the database.")]
    TableMissing { table: String },

    #[error("Statement rejected: {0}")]
    Rejected(String),
}

impl PipelineError {
    /// Short label used in logs and JSON responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Translation(_) => "translation",
            Self::Schema(_) => "schema",
            Self::Execution(_) => "execution",
            Self::TableMissing { .. } => "table_missing",
            Self::Rejected(_) => "rejected",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
