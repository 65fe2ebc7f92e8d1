//! The uniform response envelope handed to the presentation layer.
//!
//! [`AnswerEnvelope`] is a sum type: each variant carries only its own
//! payload, so "exactly one payload per envelope" holds by construction.
//!
//! Wire format (JSON):
//!
//! ```json
//! { "type": "physics", "answer": "...", "constantsUsed": ["speedOfLight"],
//!   "originalQuery": "What is the speed of light?", "timestamp": 1718000000000 }
//! ```

pub mod category;

use crate::core::subject::Subject;
use category::ErrorCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to TutorVerse! Ask me anything about Math or Physics.";

/// Discriminant of an [`AnswerEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    Math,
    Physics,
    Error,
    General,
    Empty,
}

impl EnvelopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeKind::Math => "math",
            EnvelopeKind::Physics => "physics",
            EnvelopeKind::Error => "error",
            EnvelopeKind::General => "general",
            EnvelopeKind::Empty => "empty",
        }
    }
}

impl From<Subject> for EnvelopeKind {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Math => EnvelopeKind::Math,
            Subject::Physics => EnvelopeKind::Physics,
        }
    }
}

impl std::fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one dispatch, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnswerEnvelope {
    Math {
        solution: String,
        original_query: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        timestamp: DateTime<Utc>,
    },
    Physics {
        answer: String,
        constants_used: Vec<String>,
        original_query: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        timestamp: DateTime<Utc>,
    },
    Error {
        category: ErrorCategory,
        #[serde(rename = "error")]
        message: String,
        original_query: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        timestamp: DateTime<Utc>,
    },
    General {
        #[serde(rename = "answer")]
        message: String,
        original_query: String,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        timestamp: DateTime<Utc>,
    },
    Empty {
        #[serde(with = "chrono::serde::ts_milliseconds")]
        timestamp: DateTime<Utc>,
    },
}

impl AnswerEnvelope {
    pub fn math(original_query: impl Into<String>, solution: impl Into<String>) -> Self {
        AnswerEnvelope::Math {
            solution: solution.into(),
            original_query: original_query.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn physics(
        original_query: impl Into<String>,
        answer: impl Into<String>,
        constants_used: Vec<String>,
    ) -> Self {
        AnswerEnvelope::Physics {
            answer: answer.into(),
            constants_used,
            original_query: original_query.into(),
            timestamp: Utc::now(),
        }
    }

    /// An error envelope carrying the category's fixed user message.
    pub fn error(original_query: impl Into<String>, category: ErrorCategory) -> Self {
        AnswerEnvelope::Error {
            category,
            message: category.user_message().to_string(),
            original_query: original_query.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn general(original_query: impl Into<String>, message: impl Into<String>) -> Self {
        AnswerEnvelope::General {
            message: message.into(),
            original_query: original_query.into(),
            timestamp: Utc::now(),
        }
    }

    /// The greeting shown before any question has been asked.
    pub fn welcome() -> Self {
        Self::general("", WELCOME_MESSAGE)
    }

    pub fn empty() -> Self {
        AnswerEnvelope::Empty {
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        match self {
            AnswerEnvelope::Math { .. } => EnvelopeKind::Math,
            AnswerEnvelope::Physics { .. } => EnvelopeKind::Physics,
            AnswerEnvelope::Error { .. } => EnvelopeKind::Error,
            AnswerEnvelope::General { .. } => EnvelopeKind::General,
            AnswerEnvelope::Empty { .. } => EnvelopeKind::Empty,
        }
    }

    pub fn original_query(&self) -> &str {
        match self {
            AnswerEnvelope::Math { original_query, .. }
            | AnswerEnvelope::Physics { original_query, .. }
            | AnswerEnvelope::Error { original_query, .. }
            | AnswerEnvelope::General { original_query, .. } => original_query,
            AnswerEnvelope::Empty { .. } => "",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            AnswerEnvelope::Math { timestamp, .. }
            | AnswerEnvelope::Physics { timestamp, .. }
            | AnswerEnvelope::Error { timestamp, .. }
            | AnswerEnvelope::General { timestamp, .. }
            | AnswerEnvelope::Empty { timestamp } => *timestamp,
        }
    }

    pub fn solution(&self) -> Option<&str> {
        match self {
            AnswerEnvelope::Math { solution, .. } => Some(solution),
            _ => None,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            AnswerEnvelope::Physics { answer, .. } => Some(answer),
            _ => None,
        }
    }

    pub fn constants_used(&self) -> &[String] {
        match self {
            AnswerEnvelope::Physics { constants_used, .. } => constants_used,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AnswerEnvelope::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self {
            AnswerEnvelope::Error { category, .. } => Some(*category),
            _ => None,
        }
    }

    pub fn general_message(&self) -> Option<&str> {
        match self {
            AnswerEnvelope::General { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnswerEnvelope::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_payloads(envelope: &AnswerEnvelope) -> usize {
        [
            envelope.solution(),
            envelope.answer(),
            envelope.error_message(),
            envelope.general_message(),
        ]
        .iter()
        .filter(|p| p.is_some_and(|s| !s.is_empty()))
        .count()
    }

    #[test]
    fn test_exactly_one_payload_per_kind() {
        let cases = [
            (AnswerEnvelope::math("q", "30"), EnvelopeKind::Math),
            (
                AnswerEnvelope::physics("q", "c", vec!["speedOfLight".to_string()]),
                EnvelopeKind::Physics,
            ),
            (
                AnswerEnvelope::error("q", ErrorCategory::ProviderQuota),
                EnvelopeKind::Error,
            ),
            (AnswerEnvelope::welcome(), EnvelopeKind::General),
        ];
        for (envelope, kind) in cases {
            assert_eq!(envelope.kind(), kind);
            assert_eq!(populated_payloads(&envelope), 1, "{kind}");
        }
        assert_eq!(populated_payloads(&AnswerEnvelope::empty()), 0);
    }

    #[test]
    fn test_error_envelope_uses_fixed_message() {
        let envelope = AnswerEnvelope::error("", ErrorCategory::InputEmpty);
        assert_eq!(
            envelope.error_message(),
            Some("Question cannot be empty. Please enter your question.")
        );
        assert_eq!(envelope.error_category(), Some(ErrorCategory::InputEmpty));
        assert_eq!(envelope.original_query(), "");
        assert!(envelope.constants_used().is_empty());
    }

    #[test]
    fn test_math_wire_format() {
        let envelope = AnswerEnvelope::math("What is 15% of 200?", "30");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["type"], "math");
        assert_eq!(json["solution"], "30");
        assert_eq!(json["originalQuery"], "What is 15% of 200?");
        assert!(json["timestamp"].is_i64());
        assert!(json.get("answer").is_none());
    }

    #[test]
    fn test_physics_and_error_wire_format() {
        let physics = AnswerEnvelope::physics("q", "a", vec!["speedOfLight".to_string()]);
        let json = serde_json::to_value(&physics).unwrap();
        assert_eq!(json["type"], "physics");
        assert_eq!(json["constantsUsed"][0], "speedOfLight");

        let error = AnswerEnvelope::error("q", ErrorCategory::ProviderTimeout);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["category"], "provider_timeout");
        assert_eq!(
            json["error"],
            "The request to the AI service timed out. Please try again."
        );
    }

    #[test]
    fn test_general_text_is_under_answer() {
        let json = serde_json::to_value(AnswerEnvelope::welcome()).unwrap();
        assert_eq!(json["type"], "general");
        assert_eq!(json["answer"], WELCOME_MESSAGE);
        assert_eq!(json["originalQuery"], "");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_deserialize_round_trip_keeps_millis() {
        let envelope = AnswerEnvelope::general("", "hello");
        let json = serde_json::to_string(&envelope).unwrap();
        let back: AnswerEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back.general_message(), Some("hello"));
        assert_eq!(
            back.timestamp().timestamp_millis(),
            envelope.timestamp().timestamp_millis()
        );
    }

    #[test]
    fn test_kind_from_subject() {
        assert_eq!(EnvelopeKind::from(Subject::Math), EnvelopeKind::Math);
        assert_eq!(EnvelopeKind::from(Subject::Physics), EnvelopeKind::Physics);
    }
}
