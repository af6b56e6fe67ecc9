//! Chat-completion sampler: web search first, plain fallback, unbounded retry.

use std::time::Duration;

use tokio::time::sleep;

use crate::api::{ApiError, ChatApi, ChatClient, ChatRequest, Tool, Usage};
use crate::message::Message;

/// Sentinel text returned when the provider rejects the request as malformed.
pub const BAD_REQUEST_RESPONSE: &str = "No response (bad request).";

/// Sentinel text returned when a configured attempt bound is exhausted.
pub const RETRIES_EXHAUSTED_RESPONSE: &str = "No response (retries exhausted).";

/// The model family rejects any other sampling temperature.
const REQUIRED_TEMPERATURE: f32 = 1.0;

/// Sampler configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Optional system message prepended to every conversation.
    pub system_message: Option<String>,
    /// Preferred sampling temperature. Retained for callers that inspect the
    /// configuration; requests always pin the temperature to 1.0.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Encoding preference for image content parts.
    pub image_format: String,
    /// Optional bound on backoff attempts. `None` retries forever, which is
    /// the intended mode for batch evaluation runs.
    pub max_attempts: Option<u32>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            model: "gpt-5".to_string(),
            system_message: None,
            temperature: 0.5,
            max_tokens: 1024,
            image_format: "url".to_string(),
            max_attempts: None,
        }
    }
}

impl SamplerConfig {
    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the system message prepended to every conversation.
    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    /// Set the preferred sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the upper bound on generated tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Bound the number of backoff attempts instead of retrying forever.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Usage statistics attached to a sampler response, or absence thereof.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseMetadata {
    pub usage: Option<Usage>,
}

/// Result of one completion call.
#[derive(Debug, Clone)]
pub struct SamplerResponse {
    /// Generated text, or a fixed sentinel for terminal failures.
    pub response_text: String,
    /// Provider-reported usage statistics.
    pub response_metadata: ResponseMetadata,
    /// The exact message list sent, after system-message prepending.
    pub actual_queried_message_list: Vec<Message>,
}

impl SamplerResponse {
    fn terminal(sentinel: &str, messages: Vec<Message>) -> Self {
        Self {
            response_text: sentinel.to_string(),
            response_metadata: ResponseMetadata { usage: None },
            actual_queried_message_list: messages,
        }
    }
}

/// Issues chat completions with web search enabled, falling back to a plain
/// request when the tool attempt fails and retrying transient failures with
/// exponential backoff.
pub struct CompletionSampler<C: ChatApi = ChatClient> {
    config: SamplerConfig,
    api: C,
}

impl CompletionSampler<ChatClient> {
    /// Build a sampler over the real HTTP client, with the credential taken
    /// from the environment.
    pub fn new(config: SamplerConfig) -> Result<Self, ApiError> {
        Ok(Self::with_api(config, ChatClient::from_env()?))
    }
}

impl<C: ChatApi> CompletionSampler<C> {
    /// Build a sampler over an explicit API backend.
    pub fn with_api(config: SamplerConfig, api: C) -> Self {
        Self { config, api }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    /// Request a completion for `conversation`.
    ///
    /// Never fails from the caller's point of view: a malformed request
    /// produces a sentinel response, every other failure is retried with
    /// `2^attempt` seconds of backoff until a non-empty reply arrives.
    pub async fn complete(&self, conversation: &[Message]) -> SamplerResponse {
        let messages = self.build_message_list(conversation);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages.clone(),
            temperature: REQUIRED_TEMPERATURE,
            max_completion_tokens: self.config.max_tokens,
            tools: Some(vec![Tool::web_search()]),
        };

        let mut attempt: u32 = 0;
        loop {
            match self.attempt_with_fallback(&request).await {
                Ok((response_text, usage)) => {
                    return SamplerResponse {
                        response_text,
                        response_metadata: ResponseMetadata { usage },
                        actual_queried_message_list: messages,
                    };
                }
                Err(err) if !err.is_retryable() => {
                    tracing::warn!("Bad request: {}", err);
                    return SamplerResponse::terminal(BAD_REQUEST_RESPONSE, messages);
                }
                Err(err) => {
                    if let Some(max_attempts) = self.config.max_attempts {
                        if attempt >= max_attempts {
                            tracing::error!("Giving up after {} attempts: {}", attempt, err);
                            return SamplerResponse::terminal(RETRIES_EXHAUSTED_RESPONSE, messages);
                        }
                    }
                    let wait = backoff_delay(attempt);
                    tracing::warn!(
                        "Request failed, retry {} after {}s: {}",
                        attempt,
                        wait.as_secs(),
                        err
                    );
                    sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }

    /// One full attempt: web search first, then an otherwise-identical
    /// request without tools if the first tier fails for any reason.
    async fn attempt_with_fallback(
        &self,
        request: &ChatRequest,
    ) -> Result<(String, Option<Usage>), ApiError> {
        let completion = match self.api.chat_completion(request).await {
            Ok(completion) => completion,
            Err(web_error) => {
                tracing::warn!(
                    "Web search not available, falling back to a plain request: {}",
                    web_error
                );
                self.api.chat_completion(&request.without_tools()).await?
            }
        };

        // An empty or absent text payload is a retryable failure, not a
        // successful empty response.
        let text = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|content| !content.is_empty())
            .ok_or(ApiError::EmptyResponse)?
            .to_string();

        Ok((text, completion.usage))
    }

    /// The exact message list sent: configured system message first, then the
    /// caller's conversation, order preserved. The input slice is never
    /// modified.
    fn build_message_list(&self, conversation: &[Message]) -> Vec<Message> {
        match &self.config.system_message {
            Some(system_message) => {
                let mut messages = Vec::with_capacity(conversation.len() + 1);
                messages.push(Message::system(system_message.clone()));
                messages.extend_from_slice(conversation);
                messages
            }
            None => conversation.to_vec(),
        }
    }
}

/// Exponential backoff: attempt `n` waits `2^n` seconds. The shift is capped
/// so the delay stays defined for arbitrarily long retry runs.
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(62))
}
