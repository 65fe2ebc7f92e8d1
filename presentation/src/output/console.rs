//! Console output formatter for answer envelopes

use colored::Colorize;
use tutor_domain::AnswerEnvelope;

/// Formats envelopes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an envelope as human-readable text
    pub fn format(envelope: &AnswerEnvelope) -> String {
        let mut output = String::new();

        if !envelope.original_query().is_empty() {
            output.push_str(&format!(
                "{} {}\n\n",
                "Q:".bold(),
                envelope.original_query()
            ));
        }

        match envelope {
            AnswerEnvelope::Math { solution, .. } => {
                output.push_str(&Self::section_header("Math"));
                output.push_str(solution);
                output.push('\n');
            }
            AnswerEnvelope::Physics {
                answer,
                constants_used,
                ..
            } => {
                output.push_str(&Self::section_header("Physics"));
                output.push_str(answer);
                output.push('\n');

                if !constants_used.is_empty() {
                    output.push_str(&format!("\n{}\n", "Constants used:".cyan().bold()));
                    for key in constants_used {
                        output.push_str(&format!("  * {}\n", key));
                    }
                }
            }
            AnswerEnvelope::Error {
                category, message, ..
            } => {
                output.push_str(&format!(
                    "{} {}\n",
                    format!("Error ({}):", category).red().bold(),
                    message
                ));
            }
            AnswerEnvelope::General { message, .. } => {
                output.push_str(message);
                output.push('\n');
            }
            AnswerEnvelope::Empty { .. } => {}
        }

        output
    }

    /// Format as JSON (the same shape the HTTP endpoint returns)
    pub fn format_json(envelope: &AnswerEnvelope) -> String {
        serde_json::to_string_pretty(envelope).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_domain::ErrorCategory;

    #[test]
    fn test_math_output() {
        let output = ConsoleFormatter::format(&AnswerEnvelope::math("What is 15% of 200?", "30"));
        assert!(output.contains("What is 15% of 200?"));
        assert!(output.contains("Math"));
        assert!(output.ends_with("30\n"));
    }

    #[test]
    fn test_physics_lists_constants() {
        let envelope = AnswerEnvelope::physics(
            "What is the speed of light?",
            "About 3e8 m/s.",
            vec!["speedOfLight".to_string()],
        );
        let output = ConsoleFormatter::format(&envelope);
        assert!(output.contains("About 3e8 m/s."));
        assert!(output.contains("Constants used:"));
        assert!(output.contains("* speedOfLight"));
    }

    #[test]
    fn test_error_output_uses_user_message() {
        let output =
            ConsoleFormatter::format(&AnswerEnvelope::error("", ErrorCategory::InputEmpty));
        assert!(output.contains("input_empty"));
        assert!(output.contains(ErrorCategory::InputEmpty.user_message()));
        assert!(!output.contains("Q:"));
    }

    #[test]
    fn test_empty_envelope_prints_nothing() {
        assert!(ConsoleFormatter::format(&AnswerEnvelope::empty()).is_empty());
    }

    #[test]
    fn test_json_output() {
        let json = ConsoleFormatter::format_json(&AnswerEnvelope::math("2+2", "4"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "math");
        assert_eq!(value["solution"], "4");
        assert_eq!(value["originalQuery"], "2+2");
    }
}
