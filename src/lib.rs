//! # Web Sampler
//!
//! Retrying chat-completion sampler with web search for batch evaluation runs.
//!
//! The crate shapes a conversation into the OpenAI chat schema, issues the
//! completion request with the provider's web-search tool attached, falls
//! back to a plain request when the tool attempt fails, and retries transient
//! failures with unbounded exponential backoff. It is built for offline
//! evaluation runs where eventual completion matters more than bounded
//! latency: the caller always gets a response, never an error.
//!
//! ## Chat Completions Example
//!
//! ```rust,no_run
//! use web_sampler::{CompletionSampler, Message, SamplerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SamplerConfig::default()
//!         .with_model("gpt-5")
//!         .with_system_message("You are a careful research assistant.");
//!
//!     let sampler = CompletionSampler::new(config)?;
//!     let response = sampler
//!         .complete(&[Message::user("Who won the 2024 Tour de France?")])
//!         .await;
//!
//!     println!("{}", response.response_text);
//!     Ok(())
//! }
//! ```
//!
//! ## Responses Endpoint Example
//!
//! ```rust,no_run
//! use web_sampler::{Message, ResponsesSampler, SamplerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sampler = ResponsesSampler::new(SamplerConfig::default())?;
//!     let response = sampler
//!         .complete(&[Message::user("Summarize today's top science news.")])
//!         .await;
//!
//!     println!("{}", response.response_text);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod message;
pub mod sampler;

pub use api::{ApiConfig, ApiError, ChatApi, ChatClient, ResponsesApi, Tool, Usage};
pub use message::{
    image_part, image_part_from_bytes, text_part, Content, ContentPart, ImageUrl, Message, Role,
};
pub use sampler::{
    CompletionSampler, ResponseMetadata, ResponsesSampler, SamplerConfig, SamplerResponse,
    BAD_REQUEST_RESPONSE, RETRIES_EXHAUSTED_RESPONSE,
};
