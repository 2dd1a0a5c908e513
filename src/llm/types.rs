use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs, ResponseFormat, ResponseFormatJsonSchema,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// An image reference, either a remote URL or a `data:` URI.
    ImageUrl(String),
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// JSON-schema response format directive sent with a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub response_format: Option<JsonSchemaFormat>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

/// Assistant message content. Backends return either a JSON-encoded string
/// or, for structured output, the object itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Json(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Completion body as returned by an OpenAI-compatible backend. Only the
/// fields the service reads are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: vec![ContentPart::Text(text.into())],
        }
    }

    pub fn user(content: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        match self.role.as_str() {
            "system" => {
                let mut text = String::new();
                for part in &self.content {
                    match part {
                        ContentPart::Text(t) => text.push_str(t),
                        ContentPart::ImageUrl(_) => {
                            return Err(crate::Error::llm(
                                "System messages cannot carry image content",
                            ));
                        }
                    }
                }
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(ChatCompletionRequestSystemMessageContent::Text(text))
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build system message: {}", e))
                    })?;
                Ok(msg.into())
            }
            "user" => {
                let content = match self.content.as_slice() {
                    [ContentPart::Text(text)] => {
                        ChatCompletionRequestUserMessageContent::Text(text.clone())
                    }
                    parts => {
                        let mut openai_parts = Vec::with_capacity(parts.len());
                        for part in parts {
                            openai_parts.push(part.to_openai_part()?);
                        }
                        ChatCompletionRequestUserMessageContent::Array(openai_parts)
                    }
                };
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build user message: {}", e))
                    })?;
                Ok(msg.into())
            }
            _ => Err(crate::Error::llm(format!(
                "Unknown message role: {}",
                self.role
            ))),
        }
    }
}

impl ContentPart {
    fn to_openai_part(&self) -> Result<ChatCompletionRequestUserMessageContentPart, crate::Error> {
        match self {
            Self::Text(text) => {
                let part = ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(text.clone())
                    .build()
                    .map_err(|e| crate::Error::llm(format!("Failed to build text part: {}", e)))?;
                Ok(part.into())
            }
            Self::ImageUrl(url) => {
                let image_url = ImageUrlArgs::default()
                    .url(url.clone())
                    .build()
                    .map_err(|e| crate::Error::llm(format!("Failed to build image url: {}", e)))?;
                let part = ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build image part: {}", e))
                    })?;
                Ok(part.into())
            }
        }
    }
}

impl JsonSchemaFormat {
    pub fn to_openai_format(&self) -> ResponseFormat {
        ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: self.name.clone(),
                schema: Some(self.schema.clone()),
                strict: None,
            },
        }
    }
}

impl MessageContent {
    /// Resolves the content to a JSON value, parsing text content.
    pub fn into_json(self) -> Result<serde_json::Value, crate::Error> {
        match self {
            Self::Text(text) => {
                serde_json::from_str(&text).map_err(|_| crate::Error::MalformedModelOutput)
            }
            Self::Json(value) => Ok(value),
        }
    }
}
