use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde_json::Value;
use tracing::{error, info, warn};

use super::domain::{AlertReason, ChatSession, CounselorAlert, MessageOutcome, SessionId};
use super::repository::{AlertError, ChatSessionRepository, CounselorAlertPublisher};
use crate::chat::{ChatTurn, SupportChatClassifier};
use crate::config::SupportChatConfig;
use crate::identity::UserId;
use crate::workflows::RepositoryError;

/// Conversation workflow around the support-chat classifier.
pub struct SupportChatService<R, A> {
    repository: Arc<R>,
    alerts: Arc<A>,
    classifier: SupportChatClassifier,
    config: SupportChatConfig,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id(user_id: Option<&UserId>) -> SessionId {
    let seq = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let owner = user_id.map(UserId::as_str).unwrap_or("anonymous");
    SessionId(format!(
        "session_{}_{seq:04}_{owner}",
        Utc::now().timestamp_millis()
    ))
}

impl<R, A> SupportChatService<R, A>
where
    R: ChatSessionRepository + 'static,
    A: CounselorAlertPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        alerts: Arc<A>,
        classifier: SupportChatClassifier,
        config: SupportChatConfig,
    ) -> Self {
        Self {
            repository,
            alerts,
            classifier,
            config,
        }
    }

    /// Open an empty low-risk session.
    pub fn start(&self, user_id: Option<UserId>) -> Result<ChatSession, SupportChatServiceError> {
        let session_id = next_session_id(user_id.as_ref());
        let session = ChatSession::new(session_id, user_id, Utc::now());
        let stored = self.repository.insert(session)?;
        info!(session = %stored.session_id, "support chat session started");
        Ok(stored)
    }

    pub fn send(
        &self,
        session_id: &SessionId,
        user_id: Option<UserId>,
        message: &Value,
    ) -> Result<MessageOutcome, SupportChatServiceError> {
        self.send_with(session_id, user_id, message, &mut rand::rng())
    }

    /// Append the student's message, reply, and update the session's triage
    /// state. Unknown session ids are created on the fly. The exchange is
    /// applied under the store's lock so concurrent sends keep every turn.
    pub fn send_with<G: Rng>(
        &self,
        session_id: &SessionId,
        user_id: Option<UserId>,
        message: &Value,
        rng: &mut G,
    ) -> Result<MessageOutcome, SupportChatServiceError> {
        let text = match message {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        let mut reply = None;
        let mut newly_flagged = false;
        let session = self.repository.upsert_with(
            ChatSession::new(session_id.clone(), user_id, Utc::now()),
            &mut |session: &mut ChatSession| {
                let was_flagged = session.needs_human_intervention;
                session.messages.push(ChatTurn::user(text.clone(), Utc::now()));

                let answer = self
                    .classifier
                    .respond_to_value(message, &session.messages, &mut *rng);

                session
                    .messages
                    .push(ChatTurn::bot(answer.message.clone(), Utc::now()));
                session.risk_level = answer.risk_level;
                session.needs_human_intervention = answer.risk_level.needs_intervention();
                newly_flagged = !was_flagged && session.needs_human_intervention;
                reply = Some(answer);
            },
        )?;

        let Some(reply) = reply else {
            return Err(RepositoryError::Unavailable(format!(
                "session {session_id} was stored without applying the message"
            ))
            .into());
        };

        // Only the transition into high risk pages; later crisis turns are already flagged.
        if newly_flagged {
            warn!(session = %session_id, "crisis language detected; alerting counselor");
            let alert = CounselorAlert {
                session_id: session.session_id.clone(),
                user_id: session.user_id.clone(),
                reason: AlertReason::CrisisDetected,
                risk_level: reply.risk_level,
            };
            // The student already has the crisis reply; a failed page must not hide it.
            if let Err(err) = self.alerts.publish(alert) {
                error!(session = %session_id, error = %err, "counselor alert failed");
            }
        }

        Ok(MessageOutcome {
            response: reply.message,
            category: reply.category,
            risk_level: reply.risk_level,
            needs_intervention: reply.risk_level.needs_intervention(),
            suggestions: reply.suggestions,
        })
    }

    /// Most recent sessions for a student, newest first.
    pub fn history(&self, user_id: &UserId) -> Result<Vec<ChatSession>, SupportChatServiceError> {
        Ok(self
            .repository
            .recent_for_user(user_id, self.config.history_limit)?)
    }

    /// Flag a session for a human counselor and page them.
    pub fn escalate(&self, session_id: &SessionId) -> Result<ChatSession, SupportChatServiceError> {
        let session = self
            .repository
            .modify(session_id, &mut |session: &mut ChatSession| {
                session.needs_human_intervention = true;
            })?
            .ok_or(RepositoryError::NotFound)?;

        self.alerts.publish(CounselorAlert {
            session_id: session.session_id.clone(),
            user_id: session.user_id.clone(),
            reason: AlertReason::ManualEscalation,
            risk_level: session.risk_level,
        })?;

        info!(session = %session_id, "support chat escalated to counselor");
        Ok(session)
    }
}

/// Error raised by the support chat service.
#[derive(Debug, thiserror::Error)]
pub enum SupportChatServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
