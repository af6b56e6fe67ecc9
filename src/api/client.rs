//! HTTP client for the OpenAI-compatible completion API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::types::{ChatCompletion, ChatRequest, ResponsesReply, ResponsesRequest};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Completion API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("API returned an empty response")]
    EmptyResponse,
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
}

impl ApiError {
    /// Whether the failure is transient and worth another attempt.
    ///
    /// Only a malformed request is terminal; rate limits, server errors,
    /// transport failures and empty replies are all retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::BadRequest(_))
    }
}

/// Configuration for the completion API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a configuration with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a configuration with the API key taken from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| ApiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (e.g. a proxy or a compatible local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Interface to a chat-completion capable API.
///
/// Abstracting the HTTP client behind a trait lets consumers substitute a
/// scripted backend in tests.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send one chat-completion request.
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion, ApiError>;
}

/// Interface to the Responses endpoint.
#[async_trait]
pub trait ResponsesApi: Send + Sync {
    /// Send one Responses request.
    async fn create_response(&self, request: &ResponsesRequest) -> Result<ResponsesReply, ApiError>;
}

/// Client for the OpenAI-compatible completion endpoints.
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: ApiConfig,
    client: Client,
}

impl ChatClient {
    /// Create a client with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status == StatusCode::BAD_REQUEST {
                return Err(ApiError::BadRequest(message));
            }
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ChatApi for ChatClient {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion, ApiError> {
        tracing::debug!("POST /chat/completions model={}", request.model);
        self.post_json("/chat/completions", request).await
    }
}

#[async_trait]
impl ResponsesApi for ChatClient {
    async fn create_response(&self, request: &ResponsesRequest) -> Result<ResponsesReply, ApiError> {
        tracing::debug!("POST /responses model={}", request.model);
        self.post_json("/responses", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_only_bad_request_is_terminal() {
        assert!(!ApiError::BadRequest("invalid role".to_string()).is_retryable());
        assert!(ApiError::Api {
            status: 429,
            message: "rate limited".to_string()
        }
        .is_retryable());
        assert!(ApiError::Api {
            status: 500,
            message: "server error".to_string()
        }
        .is_retryable());
        assert!(ApiError::EmptyResponse.is_retryable());
    }
}
