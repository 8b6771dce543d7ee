pub mod prompt;
pub mod providers;
pub mod translator;

use async_trait::async_trait;
use thiserror::Error;

pub use translator::{QueryTranslator, strip_sql_fences};

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM connection error: {0}")]
    ConnectionError(String),
    #[error("LLM response error: {0}")]
    ResponseError(String),
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

/// A model that completes an instruction prompt followed by a user question.
///
/// Implementations return the model's raw text; cleaning it up into SQL is
/// the translator's job.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, question: &str) -> Result<String, LlmError>;
}
