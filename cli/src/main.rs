//! CLI entrypoint for TutorVerse
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tutor_application::{
    ConversationLogger, DispatchUseCase, LlmMathHandler, LlmPhysicsHandler, LlmQuestionRouter,
};
use tutor_domain::ConstantTable;
use tutor_infrastructure::{
    ConfigLoader, FileConfig, GeminiConfig, GeminiGateway, JsonSchemaToolConverter,
    JsonlConversationLogger, LocalToolExecutor, load_constants,
};
use tutor_presentation::{AppState, Cli, ConsoleFormatter, OutputFormat, SpinnerProgress, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let constants = load_constants(config.tools.constants_file.as_deref())?;
    info!("Starting TutorVerse with {} constants", constants.len());

    // === Dependency Injection ===
    let dispatch = build_dispatch(&config, constants, cli.log_file.as_deref())?;

    // Server mode
    if cli.serve {
        let bind = cli.bind.as_deref().unwrap_or(&config.server.bind);
        let addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;

        serve(AppState::new(dispatch), addr).await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --serve to start the HTTP endpoint."),
    };

    let format = cli
        .output
        .or_else(|| {
            config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_config)
        })
        .unwrap_or(OutputFormat::Text);

    // Execute with or without progress reporting
    let envelope = if cli.quiet || format == OutputFormat::Json {
        dispatch.dispatch(&question).await
    } else {
        let progress = SpinnerProgress::new();
        dispatch.dispatch_with_progress(&question, &progress).await
    };

    let output = match format {
        OutputFormat::Text => ConsoleFormatter::format(&envelope),
        OutputFormat::Json => ConsoleFormatter::format_json(&envelope),
    };

    println!("{}", output);

    if envelope.is_error() {
        std::process::exit(1);
    }

    Ok(())
}

/// Assemble the dispatch pipeline from configuration.
fn build_dispatch(
    config: &FileConfig,
    constants: Arc<ConstantTable>,
    log_file: Option<&Path>,
) -> Result<DispatchUseCase> {
    let gateway = Arc::new(GeminiGateway::new(GeminiConfig::from_provider(
        &config.provider,
    ))?);
    let tool_executor = Arc::new(LocalToolExecutor::new(constants.clone()));
    let tool_schema = Arc::new(JsonSchemaToolConverter);

    let models = config.models.to_model_config();
    let execution = config.tools.to_execution_params();

    let router = Arc::new(LlmQuestionRouter::new(gateway.clone(), models.router));
    let math = Arc::new(
        LlmMathHandler::new(
            gateway.clone(),
            tool_executor.clone(),
            tool_schema.clone(),
            models.math,
        )
        .with_execution(execution.clone()),
    );
    let physics = Arc::new(
        LlmPhysicsHandler::new(gateway, tool_executor, tool_schema, constants, models.physics)
            .with_execution(execution),
    );

    let mut dispatch = DispatchUseCase::new(router, math, physics);

    if let Some(path) = log_file {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                dispatch = dispatch.with_conversation_logger(logger);
            }
            None => warn!("Could not open conversation log {}", path.display()),
        }
    }

    Ok(dispatch)
}
