//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answer envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when the terminal allows it
    Text,
    /// The envelope as JSON, as the HTTP endpoint returns it
    Json,
}

impl OutputFormat {
    /// Parse the `[output] format` config value.
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// CLI arguments for tutorverse
#[derive(Parser, Debug)]
#[command(name = "tutorverse")]
#[command(author, version, about = "Math and physics tutor - routes each question to a subject expert")]
#[command(long_about = r#"
TutorVerse answers math and physics questions.

Each question is classified as Math or Physics by a router model, then
answered by a subject handler that can use a calculator and a table of
physical constants.

Configuration files are loaded from (in priority order):
1. TUTORVERSE_* environment variables
2. --config <path>       Explicit config file
3. ./tutorverse.toml     Project-level config
4. ~/.config/tutorverse/config.toml   Global config

Example:
  tutorverse "What is 15% of 200?"
  tutorverse --output json "What is the speed of light?"
  tutorverse --serve --bind 0.0.0.0:9002
"#)]
pub struct Cli {
    /// The question to ask (not required with --serve)
    pub question: Option<String>,

    /// Serve the HTTP endpoint instead of answering one question
    #[arg(long)]
    pub serve: bool,

    /// Address to bind the HTTP endpoint to (overrides [server] bind)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Append one JSONL record per dispatch to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
