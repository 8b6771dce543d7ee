pub mod gemini;
pub mod ollama;
pub mod remote;

use crate::config::LlmConfig;
use crate::llm::{LlmError, TextGenerator};

pub fn from_config(config: &LlmConfig) -> Result<Box<dyn TextGenerator>, LlmError> {
    let generator: Box<dyn TextGenerator> = match config.backend.as_str() {
        "gemini" => Box::new(gemini::GeminiProvider::new(config)?),
        "remote" => Box::new(remote::RemoteLlmProvider::new(config)?),
        "ollama" => Box::new(ollama::OllamaProvider::new(config)?),
        _ => {
            return Err(LlmError::ConfigError(format!(
                "Unsupported LLM backend: {}",
                config.backend
            )));
        }
    };

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            backend: backend.to_string(),
            model: "test-model".to_string(),
            api_key: api_key.map(str::to_string),
            api_url: Some("http://127.0.0.1:9".to_string()),
        }
    }

    #[test]
    fn unknown_backend_is_config_error() {
        let err = from_config(&config("local", None)).err().unwrap();
        assert!(matches!(err, LlmError::ConfigError(_)));
        assert!(err.to_string().contains("local"));
    }

    #[test]
    fn gemini_without_key_is_config_error() {
        let err = from_config(&config("gemini", None)).err().unwrap();
        assert!(matches!(err, LlmError::ConfigError(_)));
    }

    #[test]
    fn ollama_needs_no_key() {
        assert!(from_config(&config("ollama", None)).is_ok());
        assert!(from_config(&config("gemini", Some("k"))).is_ok());
    }
}
