//! Questionnaire intake: validate answers, score them, persist the result,
//! and refresh the student's tracked risk level.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentRecord, AssessmentSubmission, ItemAnswer, MentalHealthStatus,
    QuestionnaireView,
};
pub use repository::{AssessmentRepository, StatusRepository};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
