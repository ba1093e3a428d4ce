use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{AssessmentId, AssessmentSubmission, QuestionnaireView};
use super::repository::{AssessmentRepository, StatusRepository};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::identity::UserId;
use crate::screening::Instrument;
use crate::workflows::RepositoryError;

/// Router exposing questionnaire metadata, submission, and result lookups.
pub fn assessment_router<R, S>(service: Arc<AssessmentService<R, S>>) -> Router
where
    R: AssessmentRepository + 'static,
    S: StatusRepository + 'static,
{
    Router::new()
        .route("/api/v1/instruments/:instrument", get(questionnaire_handler))
        .route("/api/v1/assessments/:instrument", post(submit_handler::<R, S>))
        .route(
            "/api/v1/assessments/results/:assessment_id",
            get(result_handler::<R, S>),
        )
        .route(
            "/api/v1/users/:user_id/assessments",
            get(list_handler::<R, S>),
        )
        .route("/api/v1/users/:user_id/status", get(status_handler::<R, S>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

fn service_error_response(error: AssessmentServiceError) -> Response {
    match error {
        AssessmentServiceError::InvalidResponse(error) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
        }
        AssessmentServiceError::Repository(RepositoryError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, "assessment not found")
        }
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn questionnaire_handler(Path(instrument): Path<String>) -> Response {
    match instrument.parse::<Instrument>() {
        Ok(instrument) => {
            (StatusCode::OK, axum::Json(QuestionnaireView::from(instrument))).into_response()
        }
        Err(error) => error_response(StatusCode::NOT_FOUND, error.to_string()),
    }
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(instrument): Path<String>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
    S: StatusRepository + 'static,
{
    let instrument = match instrument.parse::<Instrument>() {
        Ok(instrument) => instrument,
        Err(error) => return error_response(StatusCode::NOT_FOUND, error.to_string()),
    };

    let AssessmentSubmission { user_id, answers } = submission;
    match service.submit(user_id, instrument, &answers) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn result_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    S: StatusRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    S: StatusRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.list(&user_id) {
        Ok(assessments) => {
            let payload = json!({ "user_id": user_id, "assessments": assessments });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn status_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    S: StatusRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.status(&user_id) {
        Ok(Some(status)) => {
            let payload = json!({
                "user_id": user_id,
                "last_assessment": status.last_assessment,
                "risk_level": status.risk_level,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "user_id": user_id,
                "last_assessment": serde_json::Value::Null,
                "risk_level": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}
