//! Dispatch progress notification port
//!
//! Reports each state transition of a dispatch so the presentation layer
//! can show a spinner or status line.

use tutor_domain::{AnswerEnvelope, ErrorCategory, Subject};

/// A state of the dispatch state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStage {
    /// Raw input accepted, not yet validated.
    Received,
    /// Input is a non-blank question; routing starts.
    Validated,
    /// The router picked a subject; the handler starts.
    Routed(Subject),
    /// The handler produced a payload.
    Answered(Subject),
    /// Success envelope built.
    Completed,
    /// Failure absorbed into an error envelope.
    Errored(ErrorCategory),
}

impl DispatchStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchStage::Completed | DispatchStage::Errored(_))
    }

    /// Short human-readable label for status displays.
    pub fn label(&self) -> String {
        match self {
            DispatchStage::Received => "Received".to_string(),
            DispatchStage::Validated => "Classifying question...".to_string(),
            DispatchStage::Routed(subject) => format!("Solving as {}...", subject),
            DispatchStage::Answered(subject) => format!("{} answer ready", subject),
            DispatchStage::Completed => "Done".to_string(),
            DispatchStage::Errored(category) => format!("Failed ({})", category.as_str()),
        }
    }
}

/// Callback for dispatch progress.
///
/// Implementations live in the presentation layer.
pub trait DispatchProgress: Send + Sync {
    /// Called on every state transition.
    fn on_stage(&self, stage: &DispatchStage);

    /// Called once with the final envelope.
    fn on_finished(&self, _envelope: &AnswerEnvelope) {}
}

/// No-op progress notifier
pub struct NoDispatchProgress;

impl DispatchProgress for NoDispatchProgress {
    fn on_stage(&self, _stage: &DispatchStage) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_stages() {
        assert!(DispatchStage::Completed.is_terminal());
        assert!(DispatchStage::Errored(ErrorCategory::Unknown).is_terminal());
        assert!(!DispatchStage::Routed(Subject::Math).is_terminal());
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            DispatchStage::Routed(Subject::Physics).label(),
            "Solving as Physics..."
        );
        assert_eq!(
            DispatchStage::Errored(ErrorCategory::InputEmpty).label(),
            "Failed (input_empty)"
        );
    }
}
