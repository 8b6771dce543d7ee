use tracing::{debug, error, info};

use crate::config::LlmConfig;
use crate::llm::prompt::SALES_PROMPT;
use crate::llm::{LlmError, TextGenerator, providers};
use crate::render::Presenter;

/// Code-fence markers the model wraps around its SQL.
const FENCE_MARKERS: [&str; 2] = ["```sql", "```"];

/// Turns a question into SQL with one call to a text-generation model.
pub struct QueryTranslator {
    generator: Box<dyn TextGenerator>,
    prompt: String,
}

impl QueryTranslator {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator,
            prompt: SALES_PROMPT.to_string(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        info!("Initializing text generator with backend: {}", config.backend);
        Ok(Self::new(providers::from_config(config)?))
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The model output is trusted as SQL once the fences are gone; nothing
    /// checks that it parses.
    pub async fn translate(&self, question: &str) -> Result<String, LlmError> {
        debug!("Translating question: {}", question);
        let raw = self.generator.generate(&self.prompt, question).await?;
        debug!("Raw model output: {}", raw);

        let sql = strip_sql_fences(&raw);
        info!("Generated SQL: {}", sql);
        Ok(sql)
    }

    /// Reports a failure through `presenter` and returns an empty string
    /// instead of an error.
    pub async fn translate_or_empty(&self, question: &str, presenter: &mut dyn Presenter) -> String {
        match self.translate(question).await {
            Ok(sql) => sql,
            Err(e) => {
                error!("Translation failed: {}", e);
                presenter.show_error(&format!("Error generating SQL: {}", e));
                String::new()
            }
        }
    }
}

/// Trims the response and removes every SQL code-fence marker in it.
pub fn strip_sql_fences(raw: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(raw.trim().to_string(), |text, marker| text.replace(marker, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingPresenter;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Canned {
        reply: Result<String, String>,
        seen: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &str, question: &str) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), question.to_string()));
            self.reply.clone().map_err(LlmError::ConnectionError)
        }
    }

    fn translator(reply: Result<&str, &str>) -> (QueryTranslator, Arc<Mutex<Vec<(String, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let generator = Canned {
            reply: reply.map(str::to_string).map_err(str::to_string),
            seen: Arc::clone(&seen),
        };
        (QueryTranslator::new(Box::new(generator)), seen)
    }

    #[test]
    fn strips_fenced_block() {
        assert_eq!(strip_sql_fences("```sql\nSELECT 1\n```"), "SELECT 1");
    }

    #[test]
    fn strips_markers_anywhere_and_trims() {
        let raw = "  \n```sql SELECT City ```FROM sales_data```sql;```\n ";
        assert_eq!(strip_sql_fences(raw), "SELECT City FROM sales_data;");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(
            strip_sql_fences("I cannot answer that."),
            "I cannot answer that."
        );
    }

    #[tokio::test]
    async fn sends_prompt_and_question_together() {
        let (translator, seen) = translator(Ok("```sql\nSELECT 1\n```"));

        let sql = translator.translate("how many rows?").await.unwrap();

        assert_eq!(sql, "SELECT 1");
        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SALES_PROMPT);
        assert_eq!(calls[0].1, "how many rows?");
    }

    #[tokio::test]
    async fn failure_yields_empty_sql_and_one_error() {
        let (translator, _) = translator(Err("quota exceeded"));
        let mut presenter = RecordingPresenter::default();

        let sql = translator.translate_or_empty("anything", &mut presenter).await;

        assert!(sql.is_empty());
        assert_eq!(presenter.errors.len(), 1);
        assert!(presenter.errors[0].contains("quota exceeded"));
    }
}
