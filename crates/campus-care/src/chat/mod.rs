//! Rule-based support chat triage.
//!
//! A message is matched against fixed keyword sets in priority order (crisis
//! first), answered from a per-category reply pool, and tagged with a risk
//! level for the escalation logic in the chat workflow.

mod classifier;
mod config;
mod domain;

pub use classifier::{ClassifierError, SupportChatClassifier};
pub use config::{ClassifierConfig, KeywordRule};
pub use domain::{ChatCategory, ChatReply, ChatTurn, Sender};
