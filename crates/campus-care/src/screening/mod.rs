//! Scoring for the self-report screening questionnaires (PHQ-9, GAD-7, GHQ).
//!
//! Scoring is a pure sum-and-band over already validated item answers. Raw
//! answers coming from forms or JSON go through [`parse_responses`] first.

mod instrument;
mod responses;
mod scoring;

pub use instrument::{Instrument, Severity, UnknownInstrument};
pub use responses::{parse_responses, InvalidResponse, ItemResponse};
pub use scoring::{recommendations, score, severity_for, ScreeningResult};
