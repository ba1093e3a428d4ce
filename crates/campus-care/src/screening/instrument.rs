use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::triage::RiskLevel;

static PHQ9_QUESTIONS: [&str; 9] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself or that you are a failure",
    "Trouble concentrating on things",
    "Moving or speaking slowly or being fidgety",
    "Thoughts that you would be better off dead",
];

static GAD7_QUESTIONS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it's hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid as if something awful might happen",
];

/// Self-report questionnaires supported by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    #[serde(rename = "PHQ9")]
    Phq9,
    #[serde(rename = "GAD7")]
    Gad7,
    #[serde(rename = "GHQ")]
    Ghq,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Phq9, Instrument::Gad7, Instrument::Ghq];

    /// Storage code, also used as the prefix of item codes.
    pub fn code(&self) -> &'static str {
        match self {
            Instrument::Phq9 => "PHQ9",
            Instrument::Gad7 => "GAD7",
            Instrument::Ghq => "GHQ",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Instrument::Phq9 => "PHQ-9 Depression Assessment",
            Instrument::Gad7 => "GAD-7 Anxiety Assessment",
            Instrument::Ghq => "GHQ General Health Assessment",
        }
    }

    /// Item wording in presentation order. GHQ is scored without a fixed item list.
    pub fn questions(&self) -> Option<&'static [&'static str]> {
        match self {
            Instrument::Phq9 => Some(&PHQ9_QUESTIONS),
            Instrument::Gad7 => Some(&GAD7_QUESTIONS),
            Instrument::Ghq => None,
        }
    }

    /// Highest answer accepted for a single item (0-3 Likert for every instrument).
    pub fn max_item_value(&self) -> u8 {
        3
    }

    /// Code for the zero-based item position, e.g. `PHQ9_Q1`.
    pub fn item_code(&self, index: usize) -> String {
        format!("{}_Q{}", self.code(), index + 1)
    }

    /// Whether a result on this instrument feeds the student's tracked risk level.
    pub fn updates_status(&self) -> bool {
        matches!(self, Instrument::Phq9)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| *ch != '-' && *ch != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "phq9" => Ok(Instrument::Phq9),
            "gad7" => Ok(Instrument::Gad7),
            "ghq" => Ok(Instrument::Ghq),
            _ => Err(UnknownInstrument(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screening instrument '{0}'")]
pub struct UnknownInstrument(pub String);

/// Ordinal severity band derived from a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "minimal",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::ModeratelySevere => "moderately-severe",
            Severity::Severe => "severe",
        }
    }

    /// Only `severe` and `moderate` raise the tracked risk; `moderately-severe` stays low.
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Severity::Severe => RiskLevel::High,
            Severity::Moderate => RiskLevel::Medium,
            Severity::Minimal | Severity::Mild | Severity::ModeratelySevere => RiskLevel::Low,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
