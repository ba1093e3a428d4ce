use campus_care::chat::SupportChatClassifier;
use campus_care::config::SupportChatConfig;
use campus_care::workflows::assessments::AssessmentService;
use campus_care::workflows::memory::{
    InMemoryAlertPublisher, InMemoryAssessmentRepository, InMemoryChatSessionRepository,
    InMemoryStatusRepository,
};
use campus_care::workflows::support_chat::SupportChatService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MemoryAssessments =
    AssessmentService<InMemoryAssessmentRepository, InMemoryStatusRepository>;
pub(crate) type MemorySupportChat =
    SupportChatService<InMemoryChatSessionRepository, InMemoryAlertPublisher>;

/// Workflow services backed by process-local stores.
pub(crate) fn in_memory_services(
    chat: SupportChatConfig,
) -> (Arc<MemoryAssessments>, Arc<MemorySupportChat>) {
    let assessments = Arc::new(AssessmentService::new(
        Arc::new(InMemoryAssessmentRepository::default()),
        Arc::new(InMemoryStatusRepository::default()),
    ));
    let support_chat = Arc::new(SupportChatService::new(
        Arc::new(InMemoryChatSessionRepository::default()),
        Arc::new(InMemoryAlertPublisher::default()),
        SupportChatClassifier::standard(),
        chat,
    ));
    (assessments, support_chat)
}
