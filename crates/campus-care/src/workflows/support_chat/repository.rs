use super::domain::{ChatSession, CounselorAlert, SessionId};
use crate::identity::UserId;
use crate::workflows::RepositoryError;

/// Storage abstraction for support conversations.
pub trait ChatSessionRepository: Send + Sync {
    fn insert(&self, session: ChatSession) -> Result<ChatSession, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<ChatSession>, RepositoryError>;
    /// Applies `change` to a stored session atomically. `None` when the id is unknown.
    fn modify(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut ChatSession),
    ) -> Result<Option<ChatSession>, RepositoryError>;
    /// Like `modify`, but stores `seed` first when its id is unknown.
    fn upsert_with(
        &self,
        seed: ChatSession,
        change: &mut dyn FnMut(&mut ChatSession),
    ) -> Result<ChatSession, RepositoryError>;
    /// Newest first, at most `limit` sessions.
    fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatSession>, RepositoryError>;
}

/// Outbound hook that reaches a human counselor (pager, e-mail, dashboard).
pub trait CounselorAlertPublisher: Send + Sync {
    fn publish(&self, alert: CounselorAlert) -> Result<(), AlertError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
