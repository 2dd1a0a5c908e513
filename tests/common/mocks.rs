use async_trait::async_trait;
use trademark_ocr::{
    Error, Result,
    llm::{
        AssistantMessage, ChatCompletionRequest, ChatCompletionResponse, Choice, LlmClient,
        MessageContent,
    },
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_responses(self, responses: Vec<ChatCompletionResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_mock_response(content: Option<MessageContent>) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "internvl".to_string(),
        choices: vec![Choice {
            index: 0,
            message: AssistantMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason: Some("Stop".to_string()),
        }],
        usage: None,
    }
}

/// Response whose content is a JSON-encoded string, as OpenAI-style backends return it.
pub fn create_mock_text_response(content: &str) -> ChatCompletionResponse {
    create_mock_response(Some(MessageContent::Text(content.to_string())))
}

pub fn create_mock_json_response(content: Value) -> ChatCompletionResponse {
    create_mock_response(Some(MessageContent::Json(content)))
}

pub fn create_empty_response() -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-empty".to_string(),
        model: "internvl".to_string(),
        choices: vec![],
        usage: None,
    }
}
