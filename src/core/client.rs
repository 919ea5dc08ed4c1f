//! LLM client with mock and live backends

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::core::errors::{LlmError, Result};
use crate::core::models::{
    validate_translation_input, BackendMode, CritiqueRequest, LlmResult, TranslationRequest,
};
use crate::core::prompts::{build_critique_prompt, build_translation_prompt};

/// Upstream bodies are cut to this many characters in error messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// A backend able to answer translation and critique requests
#[async_trait]
pub trait LlmBackend: Send + Sync + fmt::Debug {
    fn mode(&self) -> BackendMode;

    async fn translate(&self, request: &TranslationRequest) -> Result<String>;

    async fn critique(&self, request: &CritiqueRequest) -> Result<String>;
}

/// Deterministic backend that never touches the network
#[derive(Debug, Clone, Default)]
pub struct MockClient;

#[async_trait]
impl LlmBackend for MockClient {
    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        debug!("Mock translation to {}", request.target_language);
        Ok(format!(
            "[{}] {}",
            request.target_language.code(),
            request.source_text
        ))
    }

    async fn critique(&self, request: &CritiqueRequest) -> Result<String> {
        debug!("Mock critique");
        Ok(format!(
            "Rating: 9/10. Fluent and accurate. Reviewed {} characters of translation.",
            request.translated_text.chars().count()
        ))
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model_name: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    response: String,
}

/// Backend that calls the remote LLM endpoint over HTTP
#[derive(Debug, Clone)]
pub struct LiveClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    translation_model: String,
    critique_model: String,
    timeout_ms: u64,
}

impl LiveClient {
    /// Create a live client; credential and endpoint must be present
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::misconfiguration("API key is required in live mode"))?;
        let endpoint = config
            .api_endpoint
            .clone()
            .ok_or_else(|| LlmError::misconfiguration("API endpoint is required in live mode"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()
            .map_err(|e| LlmError::misconfiguration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            translation_model: config.translation_model.clone(),
            critique_model: config.critique_model.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Send one prompt to one model and return the model's text
    async fn send_request(&self, model: &str, prompt: &str) -> Result<String> {
        let body = CompletionRequest {
            model_name: model,
            prompt,
        };
        debug!("POST {} model={} prompt_chars={}", self.endpoint, model, prompt.chars().count());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))?;

        if !status.is_success() {
            return Err(LlmError::UpstreamHttp {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::MalformedResponse {
                message: format!("{} (body: {})", e, truncate(&text, MAX_ERROR_BODY_CHARS)),
            })?;

        if parsed.response.trim().is_empty() {
            return Err(LlmError::MalformedResponse {
                message: "response field is blank".to_string(),
            });
        }

        Ok(parsed.response)
    }

    fn classify_transport(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            return LlmError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        LlmError::Transport { message }
    }
}

#[async_trait]
impl LlmBackend for LiveClient {
    fn mode(&self) -> BackendMode {
        BackendMode::Live
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let prompt = build_translation_prompt(&request.source_text, request.target_language);
        self.send_request(&self.translation_model, &prompt).await
    }

    async fn critique(&self, request: &CritiqueRequest) -> Result<String> {
        request.ensure_not_blank()?;
        let prompt = build_critique_prompt(&request.original_text, &request.translated_text);
        self.send_request(&self.critique_model, &prompt).await
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Translation and critique client; every failure comes back as [`LlmResult::Failure`]
#[derive(Debug, Clone)]
pub struct LlmClient {
    backend: Arc<dyn LlmBackend>,
    max_text_length: usize,
}

impl LlmClient {
    /// Create a client, selecting the backend from `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let backend: Arc<dyn LlmBackend> = match config.mode() {
            BackendMode::Mock => Arc::new(MockClient),
            BackendMode::Live => Arc::new(LiveClient::new(config)?),
        };
        info!("LLM client ready in {} mode", backend.mode());

        Ok(Self::with_backend(backend, config.max_text_length))
    }

    pub fn with_backend(backend: Arc<dyn LlmBackend>, max_text_length: usize) -> Self {
        Self {
            backend,
            max_text_length,
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.backend.mode()
    }

    /// Translate `source_text` into `target_language` (key, ISO code or name)
    pub async fn translate(&self, source_text: &str, target_language: &str) -> LlmResult {
        let result = self.try_translate(source_text, target_language).await;
        log_outcome("translate", &result);
        result.into()
    }

    /// Ask for a critique of `translated_text` as a translation of `original_text`
    pub async fn critique(&self, original_text: &str, translated_text: &str) -> LlmResult {
        let result = self.try_critique(original_text, translated_text).await;
        log_outcome("critique", &result);
        result.into()
    }

    async fn try_translate(&self, source_text: &str, target_language: &str) -> Result<String> {
        let request =
            validate_translation_input(source_text, target_language, self.max_text_length)?;
        self.backend.translate(&request).await
    }

    async fn try_critique(&self, original_text: &str, translated_text: &str) -> Result<String> {
        let request = CritiqueRequest::new(original_text, translated_text);
        self.backend.critique(&request).await
    }
}

fn log_outcome(operation: &str, result: &Result<String>) {
    match result {
        Ok(text) => info!("{} succeeded ({} chars)", operation, text.chars().count()),
        Err(e) => warn!("{} failed [{}]: {}", operation, e.kind(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    fn mock_client() -> LlmClient {
        LlmClient::new(&AppConfig::mock()).unwrap()
    }

    #[tokio::test]
    async fn test_mock_translation_is_deterministic() {
        let client = mock_client();
        let first = client.translate("Hello world", "fr").await;
        let second = client.translate("Hello world", "fr").await;

        assert_eq!(first, LlmResult::Success { text: "[fr] Hello world".to_string() });
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_text_is_invalid_input() {
        let client = mock_client();
        assert_eq!(client.translate("", "fr").await.kind(), Some(ErrorKind::InvalidInput));
        assert_eq!(client.translate(" \n", "fr").await.kind(), Some(ErrorKind::InvalidInput));
    }

    #[tokio::test]
    async fn test_unknown_language_is_invalid_input() {
        let result = mock_client().translate("Hello", "klingon").await;
        assert_eq!(result.kind(), Some(ErrorKind::InvalidInput));
    }

    #[tokio::test]
    async fn test_mock_critique_succeeds() {
        let client = mock_client();
        let result = client.critique("Hello world", "[fr] Hello world").await;
        let text = result.text().unwrap();
        assert!(text.starts_with("Rating: 9/10"));
        assert_eq!(result, client.critique("Hello world", "[fr] Hello world").await);
    }

    #[tokio::test]
    async fn test_mock_critique_accepts_any_pair() {
        let client = mock_client();
        assert!(client.critique("", "translated").await.is_success());
        assert!(client.critique("orig", "").await.is_success());
        assert!(client.critique("", "").await.is_success());
    }

    #[tokio::test]
    async fn test_max_length_applies_to_translate() {
        let client = LlmClient::with_backend(Arc::new(MockClient), 5);
        let result = client.translate("too long", "de").await;
        assert_eq!(result.kind(), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn test_live_client_requires_credentials() {
        let config = AppConfig {
            api_endpoint: Some("http://localhost:1".to_string()),
            ..Default::default()
        };
        let err = LiveClient::new(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Misconfiguration);
        assert!(LlmClient::new(&config).is_err());
    }

    #[test]
    fn test_client_selects_backend_once() {
        assert_eq!(mock_client().mode(), BackendMode::Mock);
        let live = LlmClient::new(&AppConfig::live("http://localhost:1/v1", "key")).unwrap();
        assert_eq!(live.mode(), BackendMode::Live);
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("привет", 3), "при...");
        assert_eq!(truncate("short", 10), "short");
    }
}
