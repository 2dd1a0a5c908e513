pub mod filter;
pub mod schema;

use crate::{
    Error, Result,
    config::LlmConfig,
    llm::{ChatCompletionRequest, ChatMessage, ContentPart, LlmClient, OpenAiClient},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Text extracted from a trademark image, after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrademarkText {
    pub words_in_mark: String,
    pub chinese_character: String,
    pub descr_of_device: String,
}

pub struct TrademarkExtractor {
    client: Arc<dyn LlmClient>,
    temperature: f32,
    top_p: f32,
}

impl TrademarkExtractor {
    pub fn new(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    /// Builds an extractor backed by the OpenAI-compatible endpoint in `config`.
    pub fn from_config(config: LlmConfig) -> Result<Self> {
        info!("Using model '{}' at {}", config.model, config.base_url);
        let client = OpenAiClient::new(config.clone())?;
        Ok(Self::new(Arc::new(client), &config))
    }

    pub fn build_request(&self, image: &str) -> ChatCompletionRequest {
        let messages = vec![
            ChatMessage::system(schema::SYSTEM_PROMPT),
            ChatMessage::user(vec![
                ContentPart::Text(schema::USER_PROMPT.to_string()),
                ContentPart::ImageUrl(schema::jpeg_data_uri(image)),
            ]),
        ];

        ChatCompletionRequest {
            messages,
            response_format: Some(schema::response_format()),
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
        }
    }

    /// Runs one extraction. Failures surface as `MalformedModelOutput` when the
    /// model returned non-JSON text and as `InvalidImageData` otherwise.
    pub async fn extract(&self, image: &str) -> Result<TrademarkText> {
        self.try_extract(image)
            .await
            .map_err(Error::into_client_error)
    }

    async fn try_extract(&self, image: &str) -> Result<TrademarkText> {
        debug!("Requesting extraction for {} bytes of image data", image.len());

        let request = self.build_request(image);
        let response = self.client.create_chat_completion(request).await?;

        debug!(
            "Completion {} from {}: {} choices, {} total tokens",
            response.id,
            response.model,
            response.choices.len(),
            response.usage.as_ref().map_or(0, |u| u.total_tokens)
        );

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::llm("Model returned no choices"))?;

        debug!(
            "Using choice {} from role '{}' (finish reason: {})",
            choice.index,
            choice.message.role,
            choice.finish_reason.as_deref().unwrap_or("none")
        );

        let content = choice
            .message
            .content
            .ok_or_else(|| Error::llm("Model returned no message content"))?;

        let output = content.into_json()?;
        parse_model_output(&output)
    }
}

/// Applies the character filters to the three fields of a model output object.
pub fn parse_model_output(output: &Value) -> Result<TrademarkText> {
    let raw_words = string_field(output, schema::WORDS_IN_MARK)?;
    let raw_chinese = string_field(output, schema::CHINESE_CHARACTER)?;
    let descr_of_device = string_field(output, schema::DESCR_OF_DEVICE)?.to_string();

    let words_in_mark = filter::latin_words(raw_words);
    let chinese_character = filter::chinese_characters(raw_chinese);

    log_dropped(schema::WORDS_IN_MARK, raw_words, &words_in_mark);
    log_dropped(schema::CHINESE_CHARACTER, raw_chinese, &chinese_character);

    Ok(TrademarkText {
        words_in_mark,
        chinese_character,
        descr_of_device,
    })
}

fn string_field<'a>(output: &'a Value, field: &str) -> Result<&'a str> {
    let object = output
        .as_object()
        .ok_or_else(|| Error::llm("Model output is not a JSON object"))?;

    match object.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::llm(format!(
            "Field '{}' is not a string: {}",
            field, other
        ))),
        None => Err(Error::missing_field(field)),
    }
}

fn log_dropped(field: &str, raw: &str, filtered: &str) {
    let dropped = raw.chars().count() - filtered.chars().count();
    if dropped > 0 {
        debug!("Filtered {} characters from {}", dropped, field);
    }
}
