//! API routes

use super::server::AppState;
use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tutor_domain::{AnswerEnvelope, ErrorCategory, truncate};

type AppStateArc = Arc<AppState>;

/// Form body of `POST /api/ask`. A missing field reads as empty.
#[derive(Debug, Default, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

/// Build the full router with tracing.
pub fn router(state: AppStateArc) -> Router {
    Router::new()
        .merge(ask_routes())
        .merge(health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Ask Routes
// ============================================================================

fn ask_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/ask", post(ask))
        .route("/api/welcome", get(welcome))
}

/// Failures come back as error envelopes with status 200, including bodies
/// that are not a readable form.
async fn ask(
    State(state): State<AppStateArc>,
    form: Result<Form<AskForm>, FormRejection>,
) -> Json<AnswerEnvelope> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!("Unreadable ask form: {}", rejection);
            return Json(AnswerEnvelope::error("", ErrorCategory::InputEmpty));
        }
    };

    info!("Question received: {}", truncate(form.question.trim(), 80));
    Json(state.dispatch.dispatch(&form.question).await)
}

async fn welcome() -> Json<AnswerEnvelope> {
    Json(AnswerEnvelope::welcome())
}

// ============================================================================
// Health Routes
// ============================================================================

fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
