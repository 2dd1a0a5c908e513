use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use trademark_ocr::{
    config::LlmConfig,
    extraction::TrademarkExtractor,
    llm::LlmClient,
    server::{self, handlers::AppState},
};

/// Create a test LLM configuration with the service defaults
pub fn create_test_llm_config() -> LlmConfig {
    LlmConfig {
        base_url: "http://127.0.0.1:8000/v1".to_string(),
        api_key: "test-api-key".to_string(),
        model: "internvl".to_string(),
        temperature: 0.1,
        top_p: 0.9,
        timeout_secs: None,
    }
}

/// Build the application router around the given LLM client
pub fn create_test_app(client: Arc<dyn LlmClient>) -> Router {
    let extractor = TrademarkExtractor::new(client, &create_test_llm_config());
    server::router(AppState {
        extractor: Arc::new(extractor),
    })
}

pub fn invoke_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/invoke")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
