use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::chat::SupportChatClassifier;
use crate::config::SupportChatConfig;
use crate::identity::UserId;
use crate::workflows::memory::{InMemoryAlertPublisher, InMemoryChatSessionRepository};
use crate::workflows::support_chat::{
    support_chat_router, AlertError, ChatSession, ChatSessionRepository, CounselorAlert,
    CounselorAlertPublisher, SessionId, SupportChatService,
};
use crate::workflows::RepositoryError;

pub(super) type MemoryService =
    SupportChatService<InMemoryChatSessionRepository, InMemoryAlertPublisher>;

pub(super) fn student() -> UserId {
    UserId::from("student-042")
}

pub(super) fn build_service() -> (
    MemoryService,
    InMemoryChatSessionRepository,
    InMemoryAlertPublisher,
) {
    build_service_with_limit(SupportChatConfig::default().history_limit)
}

pub(super) fn build_service_with_limit(
    history_limit: usize,
) -> (
    MemoryService,
    InMemoryChatSessionRepository,
    InMemoryAlertPublisher,
) {
    let repository = InMemoryChatSessionRepository::default();
    let alerts = InMemoryAlertPublisher::default();
    let service = SupportChatService::new(
        Arc::new(repository.clone()),
        Arc::new(alerts.clone()),
        SupportChatClassifier::standard(),
        SupportChatConfig { history_limit },
    );
    (service, repository, alerts)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    support_chat_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl ChatSessionRepository for UnavailableRepository {
    fn insert(&self, _session: ChatSession) -> Result<ChatSession, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn modify(
        &self,
        _id: &SessionId,
        _change: &mut dyn FnMut(&mut ChatSession),
    ) -> Result<Option<ChatSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_with(
        &self,
        _seed: ChatSession,
        _change: &mut dyn FnMut(&mut ChatSession),
    ) -> Result<ChatSession, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<ChatSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent_for_user(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflinePager;

impl CounselorAlertPublisher for OfflinePager {
    fn publish(&self, _alert: CounselorAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("pager offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
