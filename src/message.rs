//! Conversation data model for the completion API.
//!
//! Messages follow the OpenAI chat schema: a role plus content that is either
//! plain text or an ordered list of typed parts (text and images).

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Speaker role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    /// System-level instructions on the Responses endpoint.
    Developer,
    User,
    Assistant,
}

/// Message content: raw text or an ordered sequence of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One element of a multi-part message, tagged with a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference carried by an image part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Content,
}

impl Message {
    /// Create a message with an explicit role and content.
    pub fn new(role: Role, content: Content) -> Self {
        Self { role, content }
    }

    /// Create a plain-text system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, Content::Text(text.into()))
    }

    /// Create a plain-text developer message (Responses endpoint).
    pub fn developer(text: impl Into<String>) -> Self {
        Self::new(Role::Developer, Content::Text(text.into()))
    }

    /// Create a plain-text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, Content::Text(text.into()))
    }

    /// Create a plain-text assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, Content::Text(text.into()))
    }

    /// Create a user message from typed content parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self::new(Role::User, Content::Parts(parts))
    }
}

/// Build a text content part.
pub fn text_part(text: impl Into<String>) -> ContentPart {
    ContentPart::Text { text: text.into() }
}

/// Build an image content part from an already-encoded payload.
///
/// The payload is embedded as-is into a `data:image/{format};{encoding},...`
/// URI; no validation or re-encoding is performed.
pub fn image_part(image: &str, encoding: &str, format: &str) -> ContentPart {
    ContentPart::ImageUrl {
        image_url: ImageUrl {
            url: format!("data:image/{};{},{}", format, encoding, image),
        },
    }
}

/// Build an image content part from raw bytes, base64-encoding them first.
pub fn image_part_from_bytes(bytes: &[u8], format: &str) -> ContentPart {
    image_part(&STANDARD.encode(bytes), "base64", format)
}
