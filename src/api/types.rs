//! Wire types for the OpenAI-compatible completion endpoints.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl ChatRequest {
    /// The same request with the tool declaration removed.
    pub fn without_tools(&self) -> Self {
        Self {
            tools: None,
            ..self.clone()
        }
    }
}

/// Tool/capability declaration attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Tool {
    /// The provider-hosted web search tool.
    pub fn web_search() -> Self {
        Self {
            kind: "web_search".to_string(),
        }
    }
}

/// Response body of `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

/// Token accounting reported by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Request body for `POST /responses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningConfig>,
}

/// Reasoning options on the Responses endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningConfig {
    pub summary: String,
}

impl ReasoningConfig {
    /// Let the provider pick the reasoning summary level.
    pub fn auto_summary() -> Self {
        Self {
            summary: "auto".to_string(),
        }
    }
}

/// Response body of `POST /responses`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesReply {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    pub usage: Option<ResponsesUsage>,
}

/// One item of the Responses output list (message, reasoning, tool call, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl ResponsesReply {
    /// Concatenated text of all `output_text` content items, in output order.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|content| content.kind == "output_text")
            .map(|content| content.text.as_str())
            .collect()
    }
}

/// Token accounting reported by the Responses endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsesUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl From<ResponsesUsage> for Usage {
    fn from(usage: ResponsesUsage) -> Self {
        Self {
            prompt_tokens: usage.input_tokens,
            completion_tokens: usage.output_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-5".to_string(),
            messages: vec![Message::user("hi")],
            temperature: 1.0,
            max_completion_tokens: 1024,
            tools: Some(vec![Tool::web_search()]),
        }
    }

    #[test]
    fn test_chat_request_serializes_web_search_tool() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["tools"], json!([{"type": "web_search"}]));
        assert_eq!(value["temperature"], json!(1.0));
        assert_eq!(value["max_completion_tokens"], json!(1024));
    }

    #[test]
    fn test_without_tools_omits_the_field() {
        let stripped = request().without_tools();
        assert_eq!(stripped.model, "gpt-5");
        let value = serde_json::to_value(stripped).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_chat_completion_deserialization() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Paris"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }))
        .unwrap();

        assert_eq!(completion.choices[0].message.content.as_deref(), Some("Paris"));
        assert_eq!(completion.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_chat_completion_with_null_content() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}],
            "usage": null
        }))
        .unwrap();

        assert!(completion.choices[0].message.content.is_none());
    }

    #[test]
    fn test_responses_output_text_skips_reasoning_items() {
        let reply: ResponsesReply = serde_json::from_value(json!({
            "output": [
                {"type": "reasoning", "summary": [{"type": "summary_text", "text": "thinking"}]},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "The answer "},
                    {"type": "output_text", "text": "is 42."}
                ]}
            ],
            "usage": {"input_tokens": 7, "output_tokens": 9, "total_tokens": 16}
        }))
        .unwrap();

        assert_eq!(reply.output_text(), "The answer is 42.");
    }

    #[test]
    fn test_responses_usage_maps_onto_chat_usage() {
        let usage: Usage = ResponsesUsage {
            input_tokens: 7,
            output_tokens: 9,
            total_tokens: 16,
        }
        .into();

        assert_eq!(usage.prompt_tokens, 7);
        assert_eq!(usage.completion_tokens, 9);
        assert_eq!(usage.total_tokens, 16);
    }
}
