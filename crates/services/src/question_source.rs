use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::QuestionSourceError;

/// Prompt shown when a question could not be generated.
pub const NO_RESPONSE_FALLBACK: &str = "No response generated";

/// Produces free-text question prompts from a short instruction.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when no prompt could be produced.
    async fn generate(&self, instruction: &str) -> Result<String, QuestionSourceError>;
}

/// Returns the same prompt for every instruction.
#[derive(Clone, Debug)]
pub struct StaticQuestionSource {
    prompt: String,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn generate(&self, _instruction: &str) -> Result<String, QuestionSourceError> {
        Ok(self.prompt.clone())
    }
}

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ChatConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("TRIALS_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("TRIALS_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("TRIALS_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        let timeout = env::var("TRIALS_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(Self::DEFAULT_TIMEOUT, Duration::from_secs);
        Some(Self {
            base_url,
            api_key,
            model,
            timeout,
        })
    }
}

/// Question source backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ChatQuestionSource {
    client: Client,
    config: Option<ChatConfig>,
}

impl ChatQuestionSource {
    /// # Errors
    ///
    /// Returns `QuestionSourceError::Http` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, QuestionSourceError> {
        Self::new(ChatConfig::from_env())
    }

    /// # Errors
    ///
    /// Returns `QuestionSourceError::Http` if the HTTP client cannot be built.
    pub fn new(config: Option<ChatConfig>) -> Result<Self, QuestionSourceError> {
        let timeout = config
            .as_ref()
            .map_or(ChatConfig::DEFAULT_TIMEOUT, |c| c.timeout);
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl QuestionSource for ChatQuestionSource {
    async fn generate(&self, instruction: &str) -> Result<String, QuestionSourceError> {
        let config = self
            .config
            .as_ref()
            .ok_or(QuestionSourceError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: instruction.to_string(),
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(QuestionSourceError::EmptyResponse)?;

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> ChatConfig {
        ChatConfig {
            base_url: format!("{}/v1/", server.uri()),
            api_key: "test-key".into(),
            model: "test-model".into(),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn returns_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "  Why monitor for years?\n" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = ChatQuestionSource::new(Some(config(&server))).unwrap();
        let prompt = source.generate("Generate a question").await.unwrap();
        assert_eq!(prompt, "Why monitor for years?");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = ChatQuestionSource::new(Some(config(&server))).unwrap();
        let err = source.generate("Generate a question").await.unwrap_err();
        assert!(matches!(err, QuestionSourceError::HttpStatus(status) if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn blank_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "   " } }]
            })))
            .mount(&server)
            .await;

        let source = ChatQuestionSource::new(Some(config(&server))).unwrap();
        let err = source.generate("Generate a question").await.unwrap_err();
        assert!(matches!(err, QuestionSourceError::EmptyResponse));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_json(json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let mut cfg = config(&server);
        cfg.timeout = Duration::from_millis(200);
        let source = ChatQuestionSource::new(Some(cfg)).unwrap();
        let err = source.generate("Generate a question").await.unwrap_err();
        assert!(matches!(err, QuestionSourceError::Http(_)));
    }

    #[tokio::test]
    async fn unconfigured_source_is_disabled() {
        let source = ChatQuestionSource::new(None).unwrap();
        assert!(!source.enabled());
        let err = source.generate("Generate a question").await.unwrap_err();
        assert!(matches!(err, QuestionSourceError::Disabled));
    }
}
