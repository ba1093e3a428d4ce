//! Campus mental-health support: questionnaire screening, support-chat
//! triage, and the workflows and HTTP routers built on them.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod screening;
pub mod telemetry;
pub mod triage;
pub mod workflows;

pub use identity::UserId;
pub use triage::RiskLevel;
