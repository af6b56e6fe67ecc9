//! OpenAI-compatible completion API: HTTP client, wire types, error taxonomy.

mod client;
mod types;

pub use client::{
    ApiConfig, ApiError, ChatApi, ChatClient, ResponsesApi, API_KEY_ENV, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use types::{
    AssistantMessage, ChatCompletion, ChatRequest, Choice, OutputContent, OutputItem,
    ReasoningConfig, ResponsesReply, ResponsesRequest, ResponsesUsage, Tool, Usage,
};
