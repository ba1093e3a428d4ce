use std::fmt;

use serde::{Deserialize, Serialize};

use super::instrument::Instrument;

/// A raw questionnaire answer as submitted by a form or API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemResponse {
    Integer(i64),
    Decimal(f64),
    Text(String),
    /// Booleans, nulls and nested values; never numeric.
    Other(serde_json::Value),
}

impl ItemResponse {
    /// Integer coercion using the leading integer of the value: `" 2"` is 2,
    /// `"3 - nearly every day"` is 3, `2.9` is 2. Digit runs too long for
    /// `i64` saturate, so they land out of range rather than non-numeric.
    pub fn coerce(&self) -> Option<i64> {
        match self {
            ItemResponse::Integer(value) => Some(*value),
            ItemResponse::Decimal(value) if value.is_finite() => Some(value.trunc() as i64),
            ItemResponse::Decimal(_) => None,
            ItemResponse::Text(raw) => leading_integer(raw),
            ItemResponse::Other(_) => None,
        }
    }
}

impl fmt::Display for ItemResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemResponse::Integer(value) => write!(f, "{value}"),
            ItemResponse::Decimal(value) => write!(f, "{value}"),
            ItemResponse::Text(raw) => f.write_str(raw),
            ItemResponse::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<u8> for ItemResponse {
    fn from(value: u8) -> Self {
        ItemResponse::Integer(i64::from(value))
    }
}

impl From<&str> for ItemResponse {
    fn from(value: &str) -> Self {
        ItemResponse::Text(value.to_string())
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Raised when a submitted answer cannot be used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidResponse {
    #[error("answer {position} ('{raw}') is not a number")]
    NotNumeric { position: usize, raw: String },
    #[error("answer {position} must be between 0 and {max}, got {raw}")]
    OutOfRange { position: usize, raw: String, max: u8 },
}

/// Coerces and range-checks every answer for the instrument. Positions in
/// errors are one-based. Item count is left to the caller.
pub fn parse_responses(
    instrument: Instrument,
    answers: &[ItemResponse],
) -> Result<Vec<u8>, InvalidResponse> {
    let max = instrument.max_item_value();

    answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let position = index + 1;
            let value = answer.coerce().ok_or_else(|| InvalidResponse::NotNumeric {
                position,
                raw: answer.to_string(),
            })?;

            u8::try_from(value)
                .ok()
                .filter(|item| *item <= max)
                .ok_or_else(|| InvalidResponse::OutOfRange {
                    position,
                    raw: answer.to_string(),
                    max,
                })
        })
        .collect()
}
