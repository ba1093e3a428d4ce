use super::domain::{AssessmentId, AssessmentRecord, MentalHealthStatus};
use crate::identity::UserId;
use crate::workflows::RepositoryError;

/// Storage abstraction for scored assessments.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Newest first.
    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Per-student wellbeing status, overwritten on each update.
pub trait StatusRepository: Send + Sync {
    fn record(&self, user_id: &UserId, status: MentalHealthStatus) -> Result<(), RepositoryError>;
    fn fetch(&self, user_id: &UserId) -> Result<Option<MentalHealthStatus>, RepositoryError>;
}
