//! User-facing error taxonomy.

use serde::{Deserialize, Serialize};

/// Category of a failed dispatch.
///
/// Each category maps to one fixed, user-safe message. Raw provider output
/// never reaches the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    InputEmpty,
    RoutingFailure,
    HandlerFailure,
    ProviderAuth,
    ProviderQuota,
    ProviderTimeout,
    ProviderModelUnavailable,
    Unknown,
}

const AUTH_KEYWORDS: &[&str] = &[
    "api key",
    "invalid api key",
    "api_key",
    "permission denied",
    "access token",
];
const QUOTA_KEYWORDS: &[&str] = &[
    "quota",
    "limit exceeded",
    "resource has been exhausted",
    "billing",
];
const TIMEOUT_KEYWORDS: &[&str] = &["timeout", "timed out"];
const MODEL_KEYWORDS: &[&str] = &["model_not_found", "model not found"];

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InputEmpty => "input_empty",
            ErrorCategory::RoutingFailure => "routing_failure",
            ErrorCategory::HandlerFailure => "handler_failure",
            ErrorCategory::ProviderAuth => "provider_auth",
            ErrorCategory::ProviderQuota => "provider_quota",
            ErrorCategory::ProviderTimeout => "provider_timeout",
            ErrorCategory::ProviderModelUnavailable => "provider_model_unavailable",
            ErrorCategory::Unknown => "unknown",
        }
    }

    /// The fixed message shown to the user for this category.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::InputEmpty => "Question cannot be empty. Please enter your question.",
            ErrorCategory::RoutingFailure => {
                "Could not determine the subject. Please try rephrasing your question or be more specific."
            }
            ErrorCategory::HandlerFailure => {
                "The tutor could not produce an answer for this question. Please try again."
            }
            ErrorCategory::ProviderAuth => {
                "There seems to be an issue with the API configuration. Please contact support if this persists."
            }
            ErrorCategory::ProviderQuota => {
                "The AI service is currently experiencing high demand or a usage limit has been reached. Please try again in a little while."
            }
            ErrorCategory::ProviderTimeout => {
                "The request to the AI service timed out. Please try again."
            }
            ErrorCategory::ProviderModelUnavailable => {
                "The AI model is currently unavailable. Please try again later."
            }
            ErrorCategory::Unknown => {
                "An unexpected error occurred while processing your question. Please try again later."
            }
        }
    }

    /// Classify a provider failure message by keyword.
    ///
    /// Checked in order auth, quota, timeout, model; the first match wins.
    /// Returns `None` when nothing matches so the caller can apply its
    /// stage-specific fallback.
    pub fn classify_message(message: &str) -> Option<ErrorCategory> {
        let lower = message.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if matches(AUTH_KEYWORDS) {
            Some(ErrorCategory::ProviderAuth)
        } else if matches(QUOTA_KEYWORDS) {
            Some(ErrorCategory::ProviderQuota)
        } else if matches(TIMEOUT_KEYWORDS) {
            Some(ErrorCategory::ProviderTimeout)
        } else if matches(MODEL_KEYWORDS) {
            Some(ErrorCategory::ProviderModelUnavailable)
        } else {
            None
        }
    }

    /// Classify a message, falling back to `Unknown`.
    pub fn classify(message: &str) -> ErrorCategory {
        Self::classify_message(message).unwrap_or(ErrorCategory::Unknown)
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_provider_messages() {
        assert_eq!(
            ErrorCategory::classify("400 Bad Request: API key not valid. Please pass a valid API key."),
            ErrorCategory::ProviderAuth
        );
        assert_eq!(
            ErrorCategory::classify("PERMISSION DENIED for project"),
            ErrorCategory::ProviderAuth
        );
        assert_eq!(
            ErrorCategory::classify("429: Resource has been exhausted (e.g. check quota)."),
            ErrorCategory::ProviderQuota
        );
        assert_eq!(
            ErrorCategory::classify("billing account disabled"),
            ErrorCategory::ProviderQuota
        );
        assert_eq!(
            ErrorCategory::classify("request timed out after 60s"),
            ErrorCategory::ProviderTimeout
        );
        assert_eq!(
            ErrorCategory::classify("models/gemini-9 model not found"),
            ErrorCategory::ProviderModelUnavailable
        );
        assert_eq!(
            ErrorCategory::classify("connection reset by peer"),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Mentions both an API key and a quota: auth is checked first.
        assert_eq!(
            ErrorCategory::classify("api_key exceeded its quota"),
            ErrorCategory::ProviderAuth
        );
        // Quota is checked before timeout.
        assert_eq!(
            ErrorCategory::classify("quota check timeout"),
            ErrorCategory::ProviderQuota
        );
    }

    #[test]
    fn test_classification_is_pure() {
        let messages = [
            "Invalid API key",
            "limit exceeded",
            "deadline: timeout",
            "MODEL_NOT_FOUND",
            "something else",
        ];
        for message in messages {
            assert_eq!(
                ErrorCategory::classify(message),
                ErrorCategory::classify(message)
            );
        }
    }

    #[test]
    fn test_user_messages_do_not_echo_input() {
        let secret = "api key sk-live-123";
        let category = ErrorCategory::classify(secret);
        assert!(!category.user_message().contains("sk-live-123"));
    }

    #[test]
    fn test_unmatched_message_returns_none() {
        assert_eq!(ErrorCategory::classify_message("bad gateway"), None);
    }
}
