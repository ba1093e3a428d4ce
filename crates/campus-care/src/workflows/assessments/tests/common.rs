use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::identity::UserId;
use crate::screening::ItemResponse;
use crate::workflows::assessments::{
    assessment_router, AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentService,
    MentalHealthStatus, StatusRepository,
};
use crate::workflows::memory::{InMemoryAssessmentRepository, InMemoryStatusRepository};
use crate::workflows::RepositoryError;

pub(super) type MemoryService =
    AssessmentService<InMemoryAssessmentRepository, InMemoryStatusRepository>;

pub(super) fn student() -> UserId {
    UserId::from("student-042")
}

pub(super) fn answers(values: &[u8]) -> Vec<ItemResponse> {
    values.iter().copied().map(ItemResponse::from).collect()
}

pub(super) fn build_service() -> (
    MemoryService,
    InMemoryAssessmentRepository,
    InMemoryStatusRepository,
) {
    let repository = InMemoryAssessmentRepository::default();
    let statuses = InMemoryStatusRepository::default();
    let service = AssessmentService::new(Arc::new(repository.clone()), Arc::new(statuses.clone()));
    (service, repository, statuses)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct ReadOnlyStatuses;

impl StatusRepository for ReadOnlyStatuses {
    fn record(&self, _user_id: &UserId, _status: MentalHealthStatus) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _user_id: &UserId) -> Result<Option<MentalHealthStatus>, RepositoryError> {
        Ok(None)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
