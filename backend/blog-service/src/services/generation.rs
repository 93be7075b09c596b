/// Generation adapter
///
/// Wraps the external text-generation backend behind [`GenerationBackend`]
/// and applies the bounded retry policy: overload failures are retried up to
/// three attempts with a fixed two-second pause, anything else aborts
/// immediately. Retried attempts are plain re-sends; generation never writes
/// to the content store, so a duplicate send is harmless.
use crate::config::GenerationConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use resilience::{retry_classified, RetryConfig, RetryError};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Instruction appended to every admin prompt
const PROMPT_SUFFIX: &str = "Generate a blog content for this topic in simple text format";

/// Raw failures from the generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend reported it is temporarily overloaded; retry-eligible
    #[error("Generation backend overloaded: {0}")]
    Overloaded(String),

    /// Any other failure; terminal
    #[error("Generation request failed: {0}")]
    Failed(String),
}

impl GenerationError {
    pub fn is_overloaded(&self) -> bool {
        matches!(self, GenerationError::Overloaded(_))
    }
}

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// One outbound completion call, no retry
    async fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError>;
}

/// Gemini-style `generateContent` REST client
pub struct GeminiClient {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Overload shows up as HTTP 503 or an "overloaded"/"UNAVAILABLE" marker in
/// the error body, depending on which layer of the backend rejected us.
fn is_overload_response(status: reqwest::StatusCode, body: &str) -> bool {
    status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        || body.contains("overloaded")
        || body.contains("UNAVAILABLE")
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "generation backend error: {}", text);
            if is_overload_response(status, &text) {
                return Err(GenerationError::Overloaded(format!("{status}: {text}")));
            }
            return Err(GenerationError::Failed(format!("{status}: {text}")));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Failed(e.to_string()))?;

        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                GenerationError::Failed("response carried no generated text".to_string())
            })
    }
}

/// Applies the precondition check and the retry policy around a backend.
#[derive(Clone)]
pub struct GenerationService {
    backend: Arc<dyn GenerationBackend>,
    retry: RetryConfig,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy; tests shorten the delay
    pub fn with_retry(backend: Arc<dyn GenerationBackend>, retry: RetryConfig) -> Self {
        Self { backend, retry }
    }

    /// Generate blog body text for a topic prompt.
    ///
    /// An empty prompt fails validation before any outbound call is made and
    /// does not touch the retry budget.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let topic = prompt.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("Prompt is required".to_string()));
        }

        let full_prompt = format!("{} {}", topic, PROMPT_SUFFIX);
        let backend = self.backend.clone();

        let result = retry_classified(
            self.retry.clone(),
            move || {
                let backend = backend.clone();
                let prompt = full_prompt.clone();
                async move { backend.complete(&prompt).await }
            },
            GenerationError::is_overloaded,
        )
        .await;

        match result {
            Ok(content) => Ok(content),
            Err(RetryError::Exhausted { attempts, last }) => Err(AppError::GenerationOverloaded(
                format!("Generation backend overloaded after {attempts} attempts: {last}"),
            )),
            Err(RetryError::Terminal(e)) => Err(AppError::Internal(e.to_string())),
        }
    }
}
