//! Support conversations: persistence of chat turns around the classifier,
//! risk tracking per session, and counselor escalation.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AlertReason, ChatSession, CounselorAlert, EscalateRequest, MessageOutcome, SendMessageRequest,
    SessionId, StartSessionRequest,
};
pub use repository::{AlertError, ChatSessionRepository, CounselorAlertPublisher};
pub use router::support_chat_router;
pub use service::{SupportChatService, SupportChatServiceError};
