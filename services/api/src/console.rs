use std::fmt::Write as _;

use campus_care::chat::{ChatReply, SupportChatClassifier};
use campus_care::error::AppError;
use campus_care::screening::{self, Instrument, ItemResponse, ScreeningResult};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Questionnaire to score: phq9, gad7 or ghq
    pub(crate) instrument: String,
    /// One answer per item, each between 0 and 3
    #[arg(required = true, num_args = 1..)]
    pub(crate) answers: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ChatArgs {
    /// Message to classify; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub(crate) message: Vec<String>,
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let instrument: Instrument = args.instrument.parse()?;
    let answers: Vec<ItemResponse> = args
        .answers
        .iter()
        .map(|answer| ItemResponse::from(answer.as_str()))
        .collect();

    let scores = screening::parse_responses(instrument, &answers)?;
    let result = screening::score(instrument, &scores);
    print!("{}", render_screening(instrument, &result));
    Ok(())
}

pub(crate) fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let message = args.message.join(" ");
    let reply = SupportChatClassifier::standard().respond(&message, &[]);
    print!("{}", render_reply(&reply));
    Ok(())
}

fn render_screening(instrument: Instrument, result: &ScreeningResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", instrument.title(), instrument.code());
    let _ = writeln!(
        out,
        "- Total score {} | severity {} | risk {}",
        result.total_score,
        result.severity.label(),
        result.severity.risk_level()
    );
    let _ = writeln!(out, "Recommendations:");
    for line in &result.recommendations {
        let _ = writeln!(out, "  - {line}");
    }
    out
}

fn render_reply(reply: &ChatReply) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", reply.message);
    let _ = writeln!(
        out,
        "- Category {} | risk {}",
        reply.category, reply.risk_level
    );
    if reply.risk_level.needs_intervention() {
        let _ = writeln!(out, "- A counselor should follow up with this student now");
    }
    let _ = writeln!(out, "Suggestions:");
    for suggestion in &reply.suggestions {
        let _ = writeln!(out, "  - {suggestion}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_care::chat::ChatCategory;
    use campus_care::RiskLevel;

    #[test]
    fn screening_render_lists_recommendations() {
        let result = screening::score(Instrument::Gad7, &[3, 3, 2, 2, 2, 2, 1]);
        let rendered = render_screening(Instrument::Gad7, &result);

        assert!(rendered.contains("Total score 15"));
        assert!(rendered.contains("severity"));
        assert_eq!(
            rendered.lines().filter(|line| line.starts_with("  - ")).count(),
            4
        );
    }

    #[test]
    fn crisis_reply_flags_follow_up() {
        let reply = SupportChatClassifier::standard().respond("I want to end it all", &[]);
        assert_eq!(reply.category, ChatCategory::Crisis);
        let rendered = render_reply(&reply);
        assert!(rendered.contains("risk high"));
        assert!(rendered.contains("counselor should follow up"));
    }

    #[test]
    fn calm_reply_has_no_follow_up_line() {
        let reply = SupportChatClassifier::standard().respond("hello", &[]);
        assert_eq!(reply.risk_level, RiskLevel::Low);
        assert!(!render_reply(&reply).contains("follow up"));
    }

    #[test]
    fn screen_rejects_unknown_instruments() {
        let args = ScreenArgs {
            instrument: "bdi".to_string(),
            answers: vec!["1".to_string()],
        };
        assert!(matches!(run_screen(args), Err(AppError::Instrument(_))));
    }

    #[test]
    fn screen_rejects_out_of_range_answers() {
        let args = ScreenArgs {
            instrument: "phq9".to_string(),
            answers: vec!["1".to_string(), "7".to_string()],
        };
        assert!(matches!(run_screen(args), Err(AppError::Screening(_))));
    }
}
