use crate::infra::{AppState, MemoryAssessments, MemorySupportChat};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use campus_care::error::AppError;
use campus_care::screening::{self, Instrument, ItemResponse, ScreeningResult};
use campus_care::workflows::assessments::assessment_router;
use campus_care::workflows::support_chat::support_chat_router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) instrument: String,
    pub(crate) responses: Vec<ItemResponse>,
}

pub(crate) fn with_service_routes(
    assessments: Arc<MemoryAssessments>,
    support_chat: Arc<MemorySupportChat>,
) -> axum::Router {
    assessment_router(assessments)
        .merge(support_chat_router(support_chat))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/screening/score",
            axum::routing::post(score_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores answers without storing anything.
pub(crate) async fn score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScreeningResult>, AppError> {
    let instrument: Instrument = payload.instrument.parse()?;
    let scores = screening::parse_responses(instrument, &payload.responses)?;
    Ok(Json(screening::score(instrument, &scores)))
}
