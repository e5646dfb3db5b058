//! Chat completion wire types for the vision provider.
//!
//! Requests are built as typed values and serialized by serde; responses are
//! deserialized into the narrow shape this service reads, so a reply without
//! `choices[0].message.content` is rejected instead of indexed blindly.

use crate::domain::analysis::errors::AnalysisError;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const MAX_TOKENS: u32 = 300;
pub const SYSTEM_INSTRUCTION: &str = "Analyze the image and determine their color season.";

/// Uploaded images are always labelled JPEG, whatever their real format.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Rendering of an absent form field inside the prompt text.
const MISSING_FIELD: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatCompletionRequest {
    /// Text of the first `text` part of the user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .find_map(|m| match &m.content {
                MessageContent::Parts(parts) => parts.iter().find_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                }),
                MessageContent::Text(text) => Some(text.as_str()),
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extract `choices[0].message.content`.
    pub fn into_content(self) -> Result<String, AnalysisError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            AnalysisError::MalformedResponse("response contains no choices".into())
        })?;
        choice.message.content.ok_or_else(|| {
            AnalysisError::MalformedResponse("first choice has no message content".into())
        })
    }
}

/// Standard-alphabet, padded base64 of the raw file bytes.
pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn color_prompt(hair_color: Option<&str>, eye_color: Option<&str>) -> String {
    format!(
        "hair color is {} and eye color is {}. which is the color season?",
        hair_color.unwrap_or(MISSING_FIELD),
        eye_color.unwrap_or(MISSING_FIELD)
    )
}

pub fn build_payload(
    model: &str,
    hair_color: Option<&str>,
    eye_color: Option<&str>,
    base64_image: &str,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: MessageContent::Text(SYSTEM_INSTRUCTION.to_string()),
            },
            ChatMessage {
                role: Role::User,
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: color_prompt(hair_color, eye_color),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{};base64,{}", IMAGE_MIME_TYPE, base64_image),
                        },
                    },
                ]),
            },
        ],
        max_tokens: MAX_TOKENS,
    }
}
