//! Presentation layer for TutorVerse
//!
//! This crate contains the CLI definition, console output formatting,
//! progress reporters, and the HTTP dispatch endpoint.

pub mod cli;
pub mod output;
pub mod progress;
pub mod web;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::SpinnerProgress;
pub use web::{AppState, router, serve};
