use serde::{Deserialize, Serialize};

use super::instrument::{Instrument, Severity};

type Recommendations = [&'static str; 4];

const PHQ9_SEVERE: Recommendations = [
    "Immediate professional help recommended",
    "Consider medication evaluation",
    "Regular counseling sessions advised",
    "Build strong support network",
];
const PHQ9_MODERATELY_SEVERE: Recommendations = [
    "Professional counseling recommended",
    "Regular monitoring needed",
    "Consider therapy options",
    "Lifestyle modifications helpful",
];
const PHQ9_MODERATE: Recommendations = [
    "Consider counseling support",
    "Practice self-care techniques",
    "Monitor symptoms regularly",
    "Engage in physical activity",
];
const PHQ9_MILD: Recommendations = [
    "Continue self-monitoring",
    "Practice stress management",
    "Maintain social connections",
    "Consider preventive measures",
];
const PHQ9_MINIMAL: Recommendations = [
    "Continue current positive habits",
    "Regular self-assessment",
    "Maintain healthy lifestyle",
    "Stay connected with support system",
];

const GAD7_SEVERE: Recommendations = [
    "Professional help strongly recommended",
    "Consider anxiety management therapy",
    "Medication evaluation may be helpful",
    "Learn anxiety coping strategies",
];
const GAD7_MODERATE: Recommendations = [
    "Counseling support beneficial",
    "Practice relaxation techniques",
    "Regular exercise recommended",
    "Mindfulness meditation helpful",
];
const GAD7_MILD: Recommendations = [
    "Monitor anxiety levels",
    "Practice stress reduction",
    "Maintain regular routine",
    "Consider counseling if worsens",
];
const GAD7_MINIMAL: Recommendations = [
    "Continue current management",
    "Regular self-monitoring",
    "Healthy lifestyle maintenance",
    "Build resilience skills",
];

const GHQ_SEVERE: Recommendations = [
    "Comprehensive mental health evaluation",
    "Professional support recommended",
    "Multiple intervention strategies",
    "Regular monitoring essential",
];
const GHQ_MODERATE: Recommendations = [
    "Consider professional guidance",
    "Focus on stress management",
    "Improve work-life balance",
    "Social support important",
];
const GHQ_MILD: Recommendations = [
    "Self-care practices important",
    "Monitor mental health",
    "Maintain social connections",
    "Regular physical activity",
];
const GHQ_MINIMAL: Recommendations = [
    "Good mental health maintenance",
    "Continue positive habits",
    "Regular health check-ins",
    "Preventive measures",
];

/// Inclusive lower bounds, highest first. Anything below the last band is `minimal`.
const PHQ9_BANDS: &[(u32, Severity)] = &[
    (20, Severity::Severe),
    (15, Severity::ModeratelySevere),
    (10, Severity::Moderate),
    (5, Severity::Mild),
];
const GAD7_BANDS: &[(u32, Severity)] = &[
    (15, Severity::Severe),
    (10, Severity::Moderate),
    (5, Severity::Mild),
];
const GHQ_BANDS: &[(u32, Severity)] = &[
    (24, Severity::Severe),
    (16, Severity::Moderate),
    (8, Severity::Mild),
];

/// Outcome of scoring one questionnaire submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    pub total_score: u32,
    pub severity: Severity,
    pub recommendations: Vec<String>,
}

/// Sums the item answers and bands the total. Item count is not checked.
pub fn score(instrument: Instrument, answers: &[u8]) -> ScreeningResult {
    let total_score: u32 = answers.iter().map(|answer| u32::from(*answer)).sum();
    let severity = severity_for(instrument, total_score);

    ScreeningResult {
        total_score,
        severity,
        recommendations: recommendations(instrument, severity)
            .iter()
            .map(|line| line.to_string())
            .collect(),
    }
}

pub fn severity_for(instrument: Instrument, total_score: u32) -> Severity {
    let bands = match instrument {
        Instrument::Phq9 => PHQ9_BANDS,
        Instrument::Gad7 => GAD7_BANDS,
        Instrument::Ghq => GHQ_BANDS,
    };

    bands
        .iter()
        .find(|(threshold, _)| total_score >= *threshold)
        .map(|(_, severity)| *severity)
        .unwrap_or(Severity::Minimal)
}

/// Fixed guidance for a band. GAD-7 and GHQ never produce `moderately-severe`;
/// if asked, they answer with their `moderate` list.
pub fn recommendations(instrument: Instrument, severity: Severity) -> &'static Recommendations {
    match (instrument, severity) {
        (Instrument::Phq9, Severity::Severe) => &PHQ9_SEVERE,
        (Instrument::Phq9, Severity::ModeratelySevere) => &PHQ9_MODERATELY_SEVERE,
        (Instrument::Phq9, Severity::Moderate) => &PHQ9_MODERATE,
        (Instrument::Phq9, Severity::Mild) => &PHQ9_MILD,
        (Instrument::Phq9, Severity::Minimal) => &PHQ9_MINIMAL,
        (Instrument::Gad7, Severity::Severe) => &GAD7_SEVERE,
        (Instrument::Gad7, Severity::ModeratelySevere | Severity::Moderate) => &GAD7_MODERATE,
        (Instrument::Gad7, Severity::Mild) => &GAD7_MILD,
        (Instrument::Gad7, Severity::Minimal) => &GAD7_MINIMAL,
        (Instrument::Ghq, Severity::Severe) => &GHQ_SEVERE,
        (Instrument::Ghq, Severity::ModeratelySevere | Severity::Moderate) => &GHQ_MODERATE,
        (Instrument::Ghq, Severity::Mild) => &GHQ_MILD,
        (Instrument::Ghq, Severity::Minimal) => &GHQ_MINIMAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_plain_sum() {
        let result = score(Instrument::Ghq, &[0, 1, 2, 3, 3, 2, 1, 0, 1, 1, 1, 1]);
        assert_eq!(result.total_score, 16);
        assert_eq!(result.severity, Severity::Moderate);
    }

    #[test]
    fn empty_submission_scores_zero() {
        for instrument in Instrument::ALL {
            let result = score(instrument, &[]);
            assert_eq!(result.total_score, 0);
            assert_eq!(result.severity, Severity::Minimal);
            assert_eq!(result.recommendations.len(), 4);
        }
    }

    #[test]
    fn phq9_band_edges() {
        let cases = [
            (0, Severity::Minimal),
            (4, Severity::Minimal),
            (5, Severity::Mild),
            (9, Severity::Mild),
            (10, Severity::Moderate),
            (14, Severity::Moderate),
            (15, Severity::ModeratelySevere),
            (19, Severity::ModeratelySevere),
            (20, Severity::Severe),
            (27, Severity::Severe),
        ];
        for (total, expected) in cases {
            assert_eq!(severity_for(Instrument::Phq9, total), expected, "total {total}");
        }
    }

    #[test]
    fn gad7_band_edges() {
        let cases = [
            (4, Severity::Minimal),
            (5, Severity::Mild),
            (9, Severity::Mild),
            (10, Severity::Moderate),
            (14, Severity::Moderate),
            (15, Severity::Severe),
        ];
        for (total, expected) in cases {
            assert_eq!(severity_for(Instrument::Gad7, total), expected, "total {total}");
        }
    }

    #[test]
    fn ghq_band_edges() {
        let cases = [
            (7, Severity::Minimal),
            (8, Severity::Mild),
            (15, Severity::Mild),
            (16, Severity::Moderate),
            (23, Severity::Moderate),
            (24, Severity::Severe),
        ];
        for (total, expected) in cases {
            assert_eq!(severity_for(Instrument::Ghq, total), expected, "total {total}");
        }
    }

    #[test]
    fn severity_never_decreases_as_total_grows() {
        for instrument in Instrument::ALL {
            let mut previous = Severity::Minimal;
            for total in 0..=40 {
                let current = severity_for(instrument, total);
                assert!(current >= previous, "{instrument} dropped at {total}");
                previous = current;
            }
        }
    }

    #[test]
    fn phq9_severe_guidance() {
        let result = score(Instrument::Phq9, &[3, 3, 3, 3, 2, 2, 2, 1, 1]);
        assert_eq!(result.total_score, 20);
        assert_eq!(result.severity, Severity::Severe);
        assert_eq!(
            result.recommendations,
            vec![
                "Immediate professional help recommended",
                "Consider medication evaluation",
                "Regular counseling sessions advised",
                "Build strong support network",
            ]
        );
    }

    #[test]
    fn gad7_mild_guidance() {
        let result = score(Instrument::Gad7, &[1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(result.total_score, 7);
        assert_eq!(result.severity, Severity::Mild);
        assert_eq!(result.recommendations[0], "Monitor anxiety levels");
        assert_eq!(result.recommendations[3], "Consider counseling if worsens");
    }

    #[test]
    fn twelve_distinct_guidance_lists() {
        let mut lists = Vec::new();
        for instrument in Instrument::ALL {
            for total in 0..=40 {
                let severity = severity_for(instrument, total);
                let list = recommendations(instrument, severity);
                if !lists.contains(&list) {
                    lists.push(list);
                }
            }
        }
        assert_eq!(lists.len(), 12);
    }

    #[test]
    fn serializes_with_camel_case_total() {
        let value = serde_json::to_value(score(Instrument::Gad7, &[3, 3, 3, 3, 3])).expect("json");
        assert_eq!(value["totalScore"], 15);
        assert_eq!(value["severity"], "severe");
    }
}
