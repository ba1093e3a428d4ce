use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{EscalateRequest, SendMessageRequest, StartSessionRequest};
use super::repository::{ChatSessionRepository, CounselorAlertPublisher};
use super::service::{SupportChatService, SupportChatServiceError};
use crate::identity::UserId;
use crate::workflows::RepositoryError;

/// Router exposing the support chat endpoints.
pub fn support_chat_router<R, A>(service: Arc<SupportChatService<R, A>>) -> Router
where
    R: ChatSessionRepository + 'static,
    A: CounselorAlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/chat/start", post(start_handler::<R, A>))
        .route("/api/v1/chat/message", post(message_handler::<R, A>))
        .route("/api/v1/chat/history/:user_id", get(history_handler::<R, A>))
        .route("/api/v1/chat/escalate", post(escalate_handler::<R, A>))
        .with_state(service)
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn start_handler<R, A>(
    State(service): State<Arc<SupportChatService<R, A>>>,
    request: Option<axum::Json<StartSessionRequest>>,
) -> Response
where
    R: ChatSessionRepository + 'static,
    A: CounselorAlertPublisher + 'static,
{
    let request = request.map(|axum::Json(body)| body).unwrap_or_default();
    match service.start(request.user_id) {
        Ok(session) => {
            let payload = json!({ "sessionId": session.session_id, "success": true });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to start chat session");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to start chat session")
        }
    }
}

pub(crate) async fn message_handler<R, A>(
    State(service): State<Arc<SupportChatService<R, A>>>,
    axum::Json(request): axum::Json<SendMessageRequest>,
) -> Response
where
    R: ChatSessionRepository + 'static,
    A: CounselorAlertPublisher + 'static,
{
    let SendMessageRequest {
        session_id,
        message,
        user_id,
    } = request;

    match service.send(&session_id, user_id, &message) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to process message");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process message")
        }
    }
}

pub(crate) async fn history_handler<R, A>(
    State(service): State<Arc<SupportChatService<R, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ChatSessionRepository + 'static,
    A: CounselorAlertPublisher + 'static,
{
    match service.history(&UserId(user_id)) {
        Ok(sessions) => {
            (StatusCode::OK, axum::Json(json!({ "chatSessions": sessions }))).into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to retrieve chat history");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve chat history")
        }
    }
}

pub(crate) async fn escalate_handler<R, A>(
    State(service): State<Arc<SupportChatService<R, A>>>,
    axum::Json(request): axum::Json<EscalateRequest>,
) -> Response
where
    R: ChatSessionRepository + 'static,
    A: CounselorAlertPublisher + 'static,
{
    match service.escalate(&request.session_id) {
        Ok(_) => {
            let payload = json!({
                "success": true,
                "message": "Your conversation has been escalated to a human counselor.",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(SupportChatServiceError::Repository(RepositoryError::NotFound)) => {
            failure(StatusCode::NOT_FOUND, "Chat session not found")
        }
        Err(err) => {
            error!(error = %err, "failed to escalate to human");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to escalate to human")
        }
    }
}
