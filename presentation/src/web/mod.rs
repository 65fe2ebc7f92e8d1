//! HTTP dispatch endpoint
//!
//! - `POST /api/ask` (form field `question`) returns the answer envelope
//! - `GET /api/welcome` returns the welcome envelope
//! - `GET /health` returns `{"status":"ok"}`

mod routes;
mod server;

pub use routes::router;
pub use server::{AppState, serve};
