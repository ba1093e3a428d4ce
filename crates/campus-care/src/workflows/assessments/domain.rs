use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::screening::{Instrument, ItemResponse, Severity};
use crate::triage::RiskLevel;

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

/// Questionnaire answers posted by a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub user_id: UserId,
    pub answers: Vec<ItemResponse>,
}

/// One scored item, keyed by its positional code (`PHQ9_Q3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAnswer {
    pub question: String,
    pub answer: String,
    pub score: u8,
}

/// Persisted assessment with its derived result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub instrument: Instrument,
    pub items: Vec<ItemAnswer>,
    pub total_score: u32,
    pub severity: Severity,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Tracked wellbeing indicators refreshed by PHQ-9 submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalHealthStatus {
    pub last_assessment: DateTime<Utc>,
    pub risk_level: RiskLevel,
}

/// Questionnaire metadata for rendering a form.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub instrument: Instrument,
    pub title: &'static str,
    pub questions: Vec<&'static str>,
    pub max_item_value: u8,
}

impl From<Instrument> for QuestionnaireView {
    fn from(instrument: Instrument) -> Self {
        Self {
            instrument,
            title: instrument.title(),
            questions: instrument.questions().map(<[_]>::to_vec).unwrap_or_default(),
            max_item_value: instrument.max_item_value(),
        }
    }
}
