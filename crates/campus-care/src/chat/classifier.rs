use std::sync::Arc;

use rand::Rng;
use serde_json::Value;
use tracing::{debug, error};

use super::config::ClassifierConfig;
use super::domain::{ChatCategory, ChatReply, ChatTurn};
use crate::triage::RiskLevel;

/// Rule-based triage of support messages. Stateless apart from its tables.
#[derive(Debug, Clone)]
pub struct SupportChatClassifier {
    config: Arc<ClassifierConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    #[error("expected a text message, got {0}")]
    NonTextMessage(&'static str),
    #[error("no replies configured for category '{0}'")]
    EmptyReplyPool(ChatCategory),
}

impl SupportChatClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn standard() -> Self {
        Self::new(ClassifierConfig::standard())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// First matching keyword rule wins, then the anchored greeting pattern,
    /// otherwise `general`.
    pub fn classify(&self, message: &str) -> (ChatCategory, RiskLevel) {
        let lowered = message.to_lowercase();

        if let Some(rule) = self.config.rules().iter().find(|rule| rule.matches(&lowered)) {
            return (rule.category, rule.risk_level);
        }

        if self.config.greeting().is_match(&lowered) {
            return (ChatCategory::Greeting, RiskLevel::Low);
        }

        (ChatCategory::General, RiskLevel::Low)
    }

    /// Classifies with the thread-local RNG picking the reply.
    pub fn respond(&self, message: &str, history: &[ChatTurn]) -> ChatReply {
        self.respond_with(message, history, &mut rand::rng())
    }

    /// `history` is accepted for context-aware triage but not consulted yet:
    /// classification depends on the current message only.
    pub fn respond_with<R: Rng>(
        &self,
        message: &str,
        _history: &[ChatTurn],
        rng: &mut R,
    ) -> ChatReply {
        self.try_respond(message, rng).unwrap_or_else(|err| {
            error!(error = %err, "support chat classification failed");
            ChatReply::apology()
        })
    }

    /// Accepts any JSON payload; anything but a string degrades to the apology reply.
    pub fn respond_to_value<R: Rng>(
        &self,
        message: &Value,
        history: &[ChatTurn],
        rng: &mut R,
    ) -> ChatReply {
        match message {
            Value::String(text) => self.respond_with(text, history, rng),
            other => {
                let err = ClassifierError::NonTextMessage(json_kind(other));
                error!(error = %err, "support chat classification failed");
                ChatReply::apology()
            }
        }
    }

    fn try_respond<R: Rng>(&self, message: &str, rng: &mut R) -> Result<ChatReply, ClassifierError> {
        let (category, risk_level) = self.classify(message);

        let pool = self.config.replies(category);
        if pool.is_empty() {
            return Err(ClassifierError::EmptyReplyPool(category));
        }
        let reply = &pool[rng.random_range(0..pool.len())];

        debug!(%category, %risk_level, "classified support message");

        Ok(ChatReply {
            message: reply.clone(),
            category,
            risk_level,
            suggestions: self.config.suggestions(category).to_vec(),
        })
    }
}

impl Default for SupportChatClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
