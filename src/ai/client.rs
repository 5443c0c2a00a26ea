//! Multi-provider client for hosted generative-language APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{AiConfig, ProviderKind};

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client with proper timeout configuration.
fn build_http_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Errors from AI client operations.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key not configured (env: {0})")]
    MissingApiKey(String),
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("Generation request timed out")]
    Timeout,
}

fn request_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::RequestFailed(e.to_string())
    }
}

/// Trait for generative-text providers.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a response for a system instruction and user prompt.
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError>;
}

/// Typed response contract for the Gemini `generateContent` endpoint.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GenerateCandidate>,
}

#[derive(Debug, Deserialize)]
struct GenerateCandidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: String,
}

impl GenerateContentResponse {
    /// First generated text block, if the response contains one.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
    }
}

/// Typed response contract for the Anthropic Messages endpoint.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<MessageBlock>,
}

#[derive(Debug, Deserialize)]
struct MessageBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl MessagesResponse {
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
    }
}

/// Gemini API provider.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    #[must_use]
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            client: build_http_client(),
            base_url,
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": user }]
            }],
            "systemInstruction": {
                "parts": [{ "text": system }]
            },
            "generationConfig": {
                "maxOutputTokens": self.max_tokens,
                "temperature": self.temperature
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        parsed
            .into_text()
            .ok_or_else(|| AiError::ParseError("No text in Gemini response".to_string()))
    }
}

/// Anthropic Messages API provider.
#[derive(Debug, Clone)]
pub struct ClaudeProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ClaudeProvider {
    /// Create a new Claude provider.
    #[must_use]
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            client: build_http_client(),
            base_url,
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl AiProvider for ClaudeProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": system,
            "messages": [{
                "role": "user",
                "content": user
            }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        parsed
            .into_text()
            .ok_or_else(|| AiError::ParseError("No text in Claude response".to_string()))
    }
}

/// Provider enum for dispatch.
#[derive(Debug, Clone)]
pub enum Provider {
    Gemini(GeminiProvider),
    Claude(ClaudeProvider),
}

#[async_trait]
impl AiProvider for Provider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        match self {
            Self::Gemini(p) => p.generate(system, user).await,
            Self::Claude(p) => p.generate(system, user).await,
        }
    }
}

/// Client for generating presales answers.
#[derive(Debug, Clone)]
pub struct AiClient {
    provider: Provider,
    config: AiConfig,
}

impl AiClient {
    /// Create a new client with the given provider and config.
    #[must_use]
    pub fn new(provider: Provider, config: AiConfig) -> Self {
        Self { provider, config }
    }

    /// Create client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AiError::MissingApiKey` if the configured API key environment
    /// variable is not set.
    pub fn from_config(config: AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AiError::MissingApiKey(config.api_key_env.clone()))?;

        let provider = match config.provider {
            ProviderKind::Gemini => Provider::Gemini(GeminiProvider::new(
                config.base_url.clone(),
                api_key,
                config.model.clone(),
                config.max_tokens,
                config.temperature,
            )),
            ProviderKind::Claude => Provider::Claude(ClaudeProvider::new(
                config.base_url.clone(),
                api_key,
                config.model.clone(),
                config.max_tokens,
                config.temperature,
            )),
        };

        Ok(Self { provider, config })
    }

    /// Get the configured model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider kind.
    #[must_use]
    pub fn provider_kind(&self) -> &ProviderKind {
        &self.config.provider
    }

    /// Send one generation request and return the response text verbatim.
    ///
    /// Single-shot: a failed call is reported to the caller, not retried.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the API request fails,
    /// `AiError::Timeout` on timeout, or `AiError::ParseError` if the
    /// response carries no generated text.
    pub async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        self.provider.generate(system, user).await
    }
}
