use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{AssessmentId, AssessmentRecord, ItemAnswer, MentalHealthStatus};
use super::repository::{AssessmentRepository, StatusRepository};
use crate::identity::UserId;
use crate::screening::{self, Instrument, InvalidResponse, ItemResponse};
use crate::triage::RiskLevel;
use crate::workflows::RepositoryError;

/// Scores questionnaire submissions and keeps the student's status current.
pub struct AssessmentService<R, S> {
    repository: Arc<R>,
    statuses: Arc<S>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R, S> AssessmentService<R, S>
where
    R: AssessmentRepository + 'static,
    S: StatusRepository + 'static,
{
    pub fn new(repository: Arc<R>, statuses: Arc<S>) -> Self {
        Self {
            repository,
            statuses,
        }
    }

    /// Validate, score, and persist a submission.
    pub fn submit(
        &self,
        user_id: UserId,
        instrument: Instrument,
        answers: &[ItemResponse],
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let scores = screening::parse_responses(instrument, answers)?;
        let result = screening::score(instrument, &scores);

        let items = answers
            .iter()
            .zip(&scores)
            .enumerate()
            .map(|(index, (answer, score))| ItemAnswer {
                question: instrument.item_code(index),
                answer: answer.to_string(),
                score: *score,
            })
            .collect();

        let created_at = Utc::now();
        let record = AssessmentRecord {
            id: next_assessment_id(),
            user_id,
            instrument,
            items,
            total_score: result.total_score,
            severity: result.severity,
            recommendations: result.recommendations,
            created_at,
        };

        let stored = self.repository.insert(record)?;

        if instrument.updates_status() {
            let risk_level = stored.severity.risk_level();
            self.statuses.record(
                &stored.user_id,
                MentalHealthStatus {
                    last_assessment: created_at,
                    risk_level,
                },
            )?;
            if risk_level == RiskLevel::High {
                warn!(
                    user = %stored.user_id,
                    assessment = %stored.id.0,
                    "severe screening result recorded"
                );
            }
        }

        info!(
            assessment = %stored.id.0,
            %instrument,
            total = stored.total_score,
            severity = %stored.severity,
            "assessment scored"
        );

        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self, user_id: &UserId) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.list_for_user(user_id)?)
    }

    pub fn status(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MentalHealthStatus>, AssessmentServiceError> {
        Ok(self.statuses.fetch(user_id)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    InvalidResponse(#[from] InvalidResponse),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
