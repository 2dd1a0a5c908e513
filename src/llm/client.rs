use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_openai::types as openai_types;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
///
/// Requests are built with async-openai's typed builders and sent once with
/// reqwest. Responses decode into [`ChatCompletionResponse`] so that message
/// content may be either a JSON-encoded string or a JSON object.
pub struct OpenAiClient {
    http: reqwest::Client,
    completions_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            http: builder.build()?,
            completions_url: completions_url(&config.base_url),
            api_key: config.api_key,
            model: config.model,
        })
    }

    fn build_openai_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<openai_types::CreateChatCompletionRequest> {
        // Convert our types to OpenAI types
        let mut messages = Vec::new();
        for msg in &request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(format) = &request.response_format {
            request_builder.response_format(format.to_openai_format());
        }

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(top_p) = request.top_p {
            request_builder.top_p(top_p);
        }

        Ok(request_builder.build()?)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages for model {}",
            request.messages.len(),
            self.model
        );

        let openai_request = self.build_openai_request(&request)?;

        let response = self
            .http
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::llm(format!(
                "backend returned {}: {}",
                status,
                api_error_message(&body)
            )));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        debug!(
            "Received chat completion response with {} choices",
            completion.choices.len()
        );

        Ok(completion)
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Pulls `error.message` out of an OpenAI-style error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
