use crate::config::LlmConfig;
use crate::llm::{LlmError, TextGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini `generateContent` client.
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            LlmError::ConfigError("Google API Key not found in environment variables!".to_string())
        })?;

        let api_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Both "gemini-2.0-flash-lite" and "models/gemini-2.0-flash-lite" are accepted
        let model_path = if config.model.starts_with("models/") {
            config.model.clone()
        } else {
            format!("models/{}", config.model)
        };

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/{}:generateContent",
                api_url.trim_end_matches('/'),
                model_path
            ),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str, question: &str) -> Result<String, LlmError> {
        info!("Sending request to Gemini with model: {}", self.model);
        debug!("API endpoint: {}", self.endpoint);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: prompt.to_string(),
                    },
                    Part {
                        text: question.to_string(),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = match response.text().await {
                Ok(body) => format!(" - Response body: {}", body),
                Err(_) => String::new(),
            };

            error!("Gemini API responded with status code: {}{}", status, error_body);
            return Err(LlmError::ResponseError(format!(
                "Gemini API responded with status code: {}{}",
                status, error_body
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ResponseError(format!("Failed to parse Gemini response: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .ok_or_else(|| LlmError::ResponseError("No candidates in response".to_string()))?;

        debug!("Gemini returned {} characters", text.len());
        Ok(text)
    }
}
