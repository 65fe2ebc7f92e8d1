//! Dispatch use case.
//!
//! The single entry point of the pipeline:
//!
//! ```text
//! Received → Validated → Routed → Answered → Completed
//!     └──────────┴──────────┴─────────┴──→ Errored
//! ```
//!
//! [`DispatchUseCase::dispatch`] never fails: every failure is classified
//! into an [`ErrorCategory`] and returned as an error envelope carrying a
//! fixed user-safe message. Raw failure detail only goes to the log.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::GatewayError;
use crate::ports::progress::{DispatchProgress, DispatchStage, NoDispatchProgress};
use crate::use_cases::route_question::QuestionRouter;
use crate::use_cases::solve_math::MathSolver;
use crate::use_cases::solve_physics::PhysicsSolver;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use tutor_domain::{AnswerEnvelope, ErrorCategory, Question, Subject, truncate};

/// Pick the category for a failure.
///
/// Structured codes win. Keyword matching applies only to provider failures,
/// never to text the model wrote. `fallback` is the stage default.
fn classify_failure(
    structured: Option<ErrorCategory>,
    provider_failure: Option<&GatewayError>,
    fallback: ErrorCategory,
) -> ErrorCategory {
    structured
        .or_else(|| provider_failure.and_then(|e| ErrorCategory::classify_message(&e.to_string())))
        .unwrap_or(fallback)
}

/// Routes a question, runs the matching handler, and wraps the outcome.
#[derive(Clone)]
pub struct DispatchUseCase {
    router: Arc<dyn QuestionRouter>,
    math: Arc<dyn MathSolver>,
    physics: Arc<dyn PhysicsSolver>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl DispatchUseCase {
    pub fn new(
        router: Arc<dyn QuestionRouter>,
        math: Arc<dyn MathSolver>,
        physics: Arc<dyn PhysicsSolver>,
    ) -> Self {
        Self {
            router,
            math,
            physics,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Dispatch a raw question.
    pub async fn dispatch(&self, raw: &str) -> AnswerEnvelope {
        self.dispatch_with_progress(raw, &NoDispatchProgress).await
    }

    /// Dispatch a raw question, reporting every state transition.
    pub async fn dispatch_with_progress(
        &self,
        raw: &str,
        progress: &dyn DispatchProgress,
    ) -> AnswerEnvelope {
        let started = Instant::now();
        progress.on_stage(&DispatchStage::Received);

        let Some(question) = Question::try_new(raw) else {
            debug!("Rejected blank question");
            let envelope = AnswerEnvelope::error("", ErrorCategory::InputEmpty);
            return self.finish(envelope, None, started, progress);
        };

        info!("Dispatching question: {}", truncate(question.content(), 100));
        progress.on_stage(&DispatchStage::Validated);

        let subject = match self.router.route(&question).await {
            Ok(subject) => subject,
            Err(err) => {
                warn!("Routing failed: {}", err);
                let category = classify_failure(
                    err.category(),
                    err.gateway_error(),
                    ErrorCategory::RoutingFailure,
                );
                let envelope = AnswerEnvelope::error(question.content(), category);
                return self.finish(envelope, None, started, progress);
            }
        };

        debug!("Routed to {}", subject);
        progress.on_stage(&DispatchStage::Routed(subject));

        let answered = match subject {
            Subject::Math => self.math.solve(&question).await.map(|solution| {
                AnswerEnvelope::math(question.content(), solution.solution)
            }),
            Subject::Physics => self.physics.solve(&question).await.map(|physics| {
                AnswerEnvelope::physics(question.content(), physics.answer, physics.constants_used)
            }),
        };

        let envelope = match answered {
            Ok(envelope) => {
                progress.on_stage(&DispatchStage::Answered(subject));
                envelope
            }
            Err(err) => {
                warn!("{} handler failed: {}", subject, err);
                let category = classify_failure(
                    err.category(),
                    err.gateway_error(),
                    ErrorCategory::HandlerFailure,
                );
                AnswerEnvelope::error(question.content(), category)
            }
        };

        self.finish(envelope, Some(subject), started, progress)
    }

    fn finish(
        &self,
        envelope: AnswerEnvelope,
        subject: Option<Subject>,
        started: Instant,
        progress: &dyn DispatchProgress,
    ) -> AnswerEnvelope {
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match envelope.error_category() {
            Some(category) => {
                progress.on_stage(&DispatchStage::Errored(category));
                self.conversation_logger.log(ConversationEvent::new(
                    "dispatch_failed",
                    serde_json::json!({
                        "query": envelope.original_query(),
                        "subject": subject.map(|s| s.as_str()),
                        "category": category.as_str(),
                        "elapsed_ms": elapsed_ms,
                    }),
                ));
                info!("Dispatch failed ({}) in {} ms", category, elapsed_ms);
            }
            None => {
                progress.on_stage(&DispatchStage::Completed);
                self.conversation_logger.log(ConversationEvent::new(
                    "dispatch_completed",
                    serde_json::json!({
                        "query": envelope.original_query(),
                        "subject": subject.map(|s| s.as_str()),
                        "kind": envelope.kind().as_str(),
                        "constants_used": envelope.constants_used(),
                        "elapsed_ms": elapsed_ms,
                    }),
                ));
                info!(
                    "Dispatch completed ({}) in {} ms",
                    envelope.kind().as_str(),
                    elapsed_ms
                );
            }
        }

        progress.on_finished(&envelope);
        envelope
    }
}
