//! Sampler for the Responses endpoint, with reasoning summaries enabled.

use tokio::time::sleep;

use super::requester::{backoff_delay, ResponseMetadata, SamplerConfig, SamplerResponse};
use crate::api::{ApiError, ChatClient, ReasoningConfig, ResponsesApi, ResponsesRequest, Tool};
use crate::message::Message;

/// Issues requests against the Responses endpoint with web search and an
/// automatic reasoning summary. Unlike [`super::CompletionSampler`] there is
/// no capability fallback tier: the endpoint hosts the tool natively, and a
/// rejected request simply yields an empty sentinel.
pub struct ResponsesSampler<C: ResponsesApi = ChatClient> {
    config: SamplerConfig,
    api: C,
}

impl ResponsesSampler<ChatClient> {
    /// Build a sampler over the real HTTP client, with the credential taken
    /// from the environment.
    pub fn new(config: SamplerConfig) -> Result<Self, ApiError> {
        Ok(Self::with_api(config, ChatClient::from_env()?))
    }
}

impl<C: ResponsesApi> ResponsesSampler<C> {
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
    /// The configured system message is sent with the `developer` role, as
    /// the Responses endpoint expects. Terminal rejections return an empty
    /// response text; every other failure backs off `2^attempt` seconds.
    pub async fn complete(&self, conversation: &[Message]) -> SamplerResponse {
        let messages = self.build_message_list(conversation);
        let request = ResponsesRequest {
            model: self.config.model.clone(),
            input: messages.clone(),
            tools: Some(vec![Tool::web_search()]),
            reasoning: Some(ReasoningConfig::auto_summary()),
        };

        let mut attempt: u32 = 0;
        loop {
            match self.api.create_response(&request).await {
                Ok(reply) => {
                    return SamplerResponse {
                        response_text: reply.output_text(),
                        response_metadata: ResponseMetadata {
                            usage: reply.usage.map(Into::into),
                        },
                        actual_queried_message_list: messages,
                    };
                }
                Err(err) if !err.is_retryable() => {
                    tracing::warn!("Bad request: {}", err);
                    return SamplerResponse {
                        response_text: String::new(),
                        response_metadata: ResponseMetadata { usage: None },
                        actual_queried_message_list: messages,
                    };
                }
                Err(err) => {
                    if let Some(max_attempts) = self.config.max_attempts {
                        if attempt >= max_attempts {
                            tracing::error!("Giving up after {} attempts: {}", attempt, err);
                            return SamplerResponse {
                                response_text: String::new(),
                                response_metadata: ResponseMetadata { usage: None },
                                actual_queried_message_list: messages,
                            };
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

    fn build_message_list(&self, conversation: &[Message]) -> Vec<Message> {
        match &self.config.system_message {
            Some(system_message) => {
                let mut messages = Vec::with_capacity(conversation.len() + 1);
                messages.push(Message::developer(system_message.clone()));
                messages.extend_from_slice(conversation);
                messages
            }
            None => conversation.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{OutputContent, OutputItem, ResponsesReply, ResponsesUsage, Usage};
    use crate::message::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    struct ScriptedApi {
        outcomes: Mutex<Vec<Result<ResponsesReply, ApiError>>>,
        requests: Mutex<Vec<ResponsesRequest>>,
    }

    impl ScriptedApi {
        fn new(outcomes: Vec<Result<ResponsesReply, ApiError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ResponsesRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResponsesApi for ScriptedApi {
        async fn create_response(
            &self,
            request: &ResponsesRequest,
        ) -> Result<ResponsesReply, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn reply(text: &str) -> ResponsesReply {
        ResponsesReply {
            output: vec![OutputItem {
                kind: "message".to_string(),
                content: vec![OutputContent {
                    kind: "output_text".to_string(),
                    text: text.to_string(),
                }],
            }],
            usage: Some(ResponsesUsage {
                input_tokens: 3,
                output_tokens: 4,
                total_tokens: 7,
            }),
        }
    }

    #[tokio::test]
    async fn test_system_message_uses_developer_role() {
        let config = SamplerConfig::default().with_system_message("Answer briefly.");
        let sampler = ResponsesSampler::with_api(config, ScriptedApi::new(vec![Ok(reply("ok"))]));

        let response = sampler.complete(&[Message::user("hi")]).await;

        assert_eq!(response.actual_queried_message_list[0].role, Role::Developer);
        let request = &sampler.api().requests()[0];
        assert_eq!(request.input, response.actual_queried_message_list);
        assert_eq!(request.tools, Some(vec![Tool::web_search()]));
        assert_eq!(
            request.reasoning,
            Some(ReasoningConfig::auto_summary())
        );
    }

    #[tokio::test]
    async fn test_usage_is_mapped_onto_chat_shape() {
        let sampler = ResponsesSampler::with_api(
            SamplerConfig::default(),
            ScriptedApi::new(vec![Ok(reply("ok"))]),
        );

        let response = sampler.complete(&[Message::user("hi")]).await;

        assert_eq!(response.response_text, "ok");
        assert_eq!(
            response.response_metadata.usage,
            Some(Usage {
                prompt_tokens: 3,
                completion_tokens: 4,
                total_tokens: 7,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_request_returns_empty_text() {
        let sampler = ResponsesSampler::with_api(
            SamplerConfig::default(),
            ScriptedApi::new(vec![Err(ApiError::BadRequest("bad input".to_string()))]),
        );

        let start = Instant::now();
        let response = sampler.complete(&[Message::user("hi")]).await;

        assert_eq!(response.response_text, "");
        assert_eq!(response.response_metadata.usage, None);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_back_off() {
        let sampler = ResponsesSampler::with_api(
            SamplerConfig::default(),
            ScriptedApi::new(vec![
                Err(ApiError::Api {
                    status: 500,
                    message: "server error".to_string(),
                }),
                Err(ApiError::Api {
                    status: 429,
                    message: "rate limited".to_string(),
                }),
                Ok(reply("recovered")),
            ]),
        );

        let start = Instant::now();
        let response = sampler.complete(&[Message::user("hi")]).await;

        assert_eq!(response.response_text, "recovered");
        // Two failures: 1s + 2s of backoff.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert_eq!(sampler.api().requests().len(), 3);
    }
}
