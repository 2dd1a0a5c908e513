use super::types::{ErrorResponse, InferenceRequest, InferenceResponse};
use crate::extraction::TrademarkExtractor;
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<TrademarkExtractor>,
}

pub async fn ping() -> Json<&'static str> {
    Json("pong")
}

pub async fn invoke(
    State(state): State<AppState>,
    Json(request): Json<InferenceRequest>,
) -> Result<Json<InferenceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    let span = info_span!("invoke", %request_id);

    async move {
        info!("Received inference request ({} bytes)", request.image.len());

        match state.extractor.extract(&request.image).await {
            Ok(text) => {
                info!("Extraction succeeded");
                Ok(Json(InferenceResponse::from(text)))
            }
            Err(e) => {
                error!("Extraction failed: {}", e);
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        detail: e.to_string(),
                    }),
                ))
            }
        }
    }
    .instrument(span)
    .await
}
