use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatCategory, ChatTurn};
use crate::identity::UserId;
use crate::triage::RiskLevel;

/// Identifier for a support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored conversation with its current triage state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: SessionId,
    pub user_id: Option<UserId>,
    pub messages: Vec<ChatTurn>,
    pub risk_level: RiskLevel,
    pub needs_human_intervention: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(session_id: SessionId, user_id: Option<UserId>, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            user_id,
            messages: Vec::new(),
            risk_level: RiskLevel::Low,
            needs_human_intervention: false,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub session_id: SessionId,
    /// Kept as raw JSON so non-text payloads still get a reply.
    pub message: serde_json::Value,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateRequest {
    pub session_id: SessionId,
}

/// What the student sees after sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOutcome {
    pub response: String,
    pub category: ChatCategory,
    pub risk_level: RiskLevel,
    pub needs_intervention: bool,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    CrisisDetected,
    ManualEscalation,
}

/// Notification sent to the counselor on duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounselorAlert {
    pub session_id: SessionId,
    pub user_id: Option<UserId>,
    pub reason: AlertReason,
    pub risk_level: RiskLevel,
}
