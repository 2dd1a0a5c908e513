pub mod handlers;
pub mod types;

use crate::{Result, config::Config, extraction::TrademarkExtractor};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/invoke", post(handlers::invoke))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let extractor = TrademarkExtractor::from_config(config.llm.clone())?;

    let app_state = handlers::AppState {
        extractor: Arc::new(extractor),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
