//! UXsearch server
//!
//! Loads the resource sheet once, then serves the question answering API.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use uxsearch_core::{
    config::AppConfig,
    logging::{self, LogFormat},
};
use uxsearch_llm::{create_client, Completer};
use uxsearch_prompt::load_template_or_default;
use uxsearch_resources::ResourceStore;
use uxsearch_server::{build_app, AppState};

/// UXsearch - answers UX questions with curated resources
#[derive(Parser, Debug)]
#[command(name = "uxsearch")]
#[command(about = "Answers UX questions with curated resources", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, env = "UXSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address (default: 0.0.0.0:8000)
    #[arg(short, long)]
    bind: Option<String>,

    /// Resource sheet CSV export (URL or file path)
    #[arg(short, long)]
    resources: Option<String>,

    /// Prompt template file (YAML)
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// LLM provider (openai, ollama)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log output format (pretty, json)
    #[arg(long, env = "UXSEARCH_LOG_FORMAT")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Config file, then environment, then CLI flags
    let config = AppConfig::load_from(cli.config)?.with_overrides(
        cli.bind,
        cli.provider,
        cli.model,
        cli.resources,
        cli.prompt_file,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    let format = match cli.log_format.as_deref() {
        Some(name) => LogFormat::parse(name)
            .with_context(|| format!("Unknown log format: {} (expected pretty or json)", name))?,
        None if config.json_logs => LogFormat::Json,
        None => LogFormat::Pretty,
    };
    logging::init_logging(config.log_level.as_deref(), config.no_color, format)?;

    tracing::info!("UXsearch starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    if let Err(e) = run(config).await {
        tracing::error!("Server failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let source = config
        .resource_source
        .as_deref()
        .context("No resource source configured")?;

    // The service never starts without its resource list
    let store = ResourceStore::load(source, &config.columns)
        .await
        .with_context(|| format!("Failed to load resources from {}", source))?;

    let template = load_template_or_default(config.prompt_file.as_deref())
        .context("Failed to load prompt template")?;
    tracing::info!("Using prompt template {}", template.id);

    let client = create_client(
        &config.provider,
        config.endpoint.as_deref(),
        config.api_key.as_deref(),
    )?;
    let completer = Completer::new(client, &config.model)
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);

    let state = AppState::new(store, completer, template)
        .with_limits(config.max_matches, config.preview_limit);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!("Listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
