use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triage::RiskLevel;

/// Topic assigned to an inbound support message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatCategory {
    Greeting,
    Anxiety,
    Depression,
    Stress,
    Crisis,
    Positive,
    General,
    Error,
}

impl ChatCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ChatCategory::Greeting => "greeting",
            ChatCategory::Anxiety => "anxiety",
            ChatCategory::Depression => "depression",
            ChatCategory::Stress => "stress",
            ChatCategory::Crisis => "crisis",
            ChatCategory::Positive => "positive",
            ChatCategory::General => "general",
            ChatCategory::Error => "error",
        }
    }
}

impl fmt::Display for ChatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message in a support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::User,
            message: message.into(),
            timestamp,
        }
    }

    pub fn bot(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::Bot,
            message: message.into(),
            timestamp,
        }
    }
}

/// Classifier output returned to the chat workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub category: ChatCategory,
    pub risk_level: RiskLevel,
    pub suggestions: Vec<String>,
}

pub(crate) const APOLOGY_MESSAGE: &str = "I'm sorry, I'm having trouble processing your message right now. Please try again, or consider speaking with a human counselor.";

impl ChatReply {
    /// Degraded reply used whenever classification fails. Always low risk.
    pub fn apology() -> Self {
        Self {
            message: APOLOGY_MESSAGE.to_string(),
            category: ChatCategory::Error,
            risk_level: RiskLevel::Low,
            suggestions: vec!["Contact counselor".to_string(), "Try again later".to_string()],
        }
    }
}
