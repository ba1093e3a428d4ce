use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::screening::Instrument;
use crate::workflows::assessments::router::{result_handler, submit_handler};
use crate::workflows::assessments::{
    AssessmentRepository, AssessmentService, AssessmentSubmission,
};
use crate::workflows::memory::{InMemoryAssessmentRepository, InMemoryStatusRepository};

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_scores_phq9() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/assessments/phq9",
            json!({ "user_id": "student-042", "answers": [3, 3, 3, 3, 2, 2, 2, 1, 1] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_score"], 20);
    assert_eq!(payload["severity"], "severe");
    assert_eq!(payload["instrument"], "PHQ9");
    assert_eq!(
        payload["recommendations"][0],
        "Immediate professional help recommended"
    );
}

#[tokio::test]
async fn submit_route_accepts_string_answers() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/assessments/GAD-7",
            json!({ "user_id": "student-042", "answers": ["1", "1", "1", "1", "1", "1", "1"] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_score"], 7);
    assert_eq!(payload["severity"], "mild");
}

#[tokio::test]
async fn submit_handler_rejects_non_numeric_answers() {
    let (service, _, _) = build_service();

    let response = submit_handler(
        State(Arc::new(service)),
        Path("phq9".to_string()),
        axum::Json(AssessmentSubmission {
            user_id: student(),
            answers: vec!["2".into(), "not at all".into()],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("answer 2"));
}

#[tokio::test]
async fn submit_handler_rejects_unknown_instruments() {
    let (service, _, _) = build_service();

    let response = submit_handler(
        State(Arc::new(service)),
        Path("bdi-ii".to_string()),
        axum::Json(AssessmentSubmission {
            user_id: student(),
            answers: answers(&[1]),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(InMemoryStatusRepository::default()),
    ));

    let response = submit_handler(
        State(service),
        Path("gad7".to_string()),
        axum::Json(AssessmentSubmission {
            user_id: student(),
            answers: answers(&[1, 2]),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn result_handler_finds_stored_assessments() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let record = service
        .submit(student(), Instrument::Ghq, &answers(&[2, 2, 2, 2]))
        .expect("submission");

    let response = result_handler::<InMemoryAssessmentRepository, InMemoryStatusRepository>(
        State(service.clone()),
        Path(record.id.0.clone()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], record.id.0.as_str());
    assert_eq!(payload["severity"], "mild");

    let missing = result_handler::<InMemoryAssessmentRepository, InMemoryStatusRepository>(
        State(service),
        Path("asmt-unknown".to_string()),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn questionnaire_route_lists_items() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/instruments/gad7")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["questions"].as_array().map(Vec::len), Some(7));
    assert_eq!(payload["max_item_value"], 3);
}

#[tokio::test]
async fn status_route_reflects_latest_phq9() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service
        .submit(student(), Instrument::Phq9, &answers(&[3, 3, 3, 3, 3, 3, 2, 0, 0]))
        .expect("severe submission");

    let router = crate::workflows::assessments::assessment_router(service);
    let response = router
        .oneshot(
            Request::get("/api/v1/users/student-042/status")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["risk_level"], "high");
    assert!(payload["last_assessment"].is_string());
}

#[tokio::test]
async fn list_route_returns_user_history() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service
        .submit(student(), Instrument::Gad7, &answers(&[0, 1]))
        .expect("submission");

    let router = crate::workflows::assessments::assessment_router(service);
    let response = router
        .oneshot(
            Request::get("/api/v1/users/student-042/assessments")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["user_id"], "student-042");
    assert_eq!(payload["assessments"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn submit_route_reports_boolean_answers_as_json_errors() {
    let (service, repository, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/assessments/gad7",
            json!({ "user_id": "student-042", "answers": [1, true, null] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "answer 2 ('true') is not a number");
    assert!(repository
        .list_for_user(&student())
        .expect("list")
        .is_empty());
}
