//! HTTP handlers. Thin glue over the analysis pipeline: request
//! validation in, structured JSON out, never a bare stack trace.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use analysis::{
    AnalysisPipeline, HttpContentFetcher, OpenAi, SerperSearchProvider,
};

/// Shared application state: one pipeline serves all requests.
pub type AppState =
    Arc<AnalysisPipeline<OpenAi, SerperSearchProvider, HttpContentFetcher, OpenAi>>;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub image_url: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn analyze(
    State(pipeline): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    if url::Url::parse(&request.image_url).is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "image_url must be a valid URL" })),
        )
            .into_response();
    }

    match pipeline.analyze_comprehensive(&request.image_url).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => {
            error!(error = %e, "analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
