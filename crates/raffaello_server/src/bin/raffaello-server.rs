//! Raffaello Server - HTTP gateway for the local Ollama CLI.
//!
//! This binary serves a small HTTP API that forwards text prompts to the
//! `ollama` command-line interface and returns the captured output with
//! timing metadata.

use clap::Parser;
use raffaello_server::{
    ApiState, DEFAULT_BIND, DEFAULT_INDEX_PAGE, DEFAULT_MODEL, DEFAULT_RUNNER_BIN,
    DEFAULT_TIMEOUT_SECS, GatewayConfig, OllamaRunner, create_router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the gateway server.
#[derive(Parser, Debug)]
#[command(name = "raffaello-server")]
#[command(about = "Raffaello - HTTP gateway for the local Ollama CLI")]
#[command(version)]
struct Args {
    /// Address and port to listen on
    #[arg(long, env = "RAFFAELLO_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Runner executable to invoke
    #[arg(long, env = "RAFFAELLO_RUNNER_BIN", default_value = DEFAULT_RUNNER_BIN)]
    runner_bin: String,

    /// Model used when a request does not name one
    #[arg(long, env = "RAFFAELLO_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Seconds a single run may take before it is killed
    #[arg(long, env = "RAFFAELLO_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// HTML page served at the root route
    #[arg(long, env = "RAFFAELLO_INDEX_PAGE", default_value = DEFAULT_INDEX_PAGE)]
    index_page: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Starting Raffaello gateway");

    let config = GatewayConfig::builder()
        .bind(args.bind)
        .runner_bin(args.runner_bin)
        .model(args.model)
        .timeout_secs(args.timeout_secs)
        .index_page(args.index_page)
        .build()
        .expect("Valid GatewayConfig");
    config.validate()?;
    let addr = config.socket_addr()?;
    info!(
        bind = %addr,
        runner = %config.runner_bin(),
        model = %config.model(),
        timeout_secs = config.timeout_secs(),
        "Configuration loaded"
    );

    let runner = Arc::new(OllamaRunner::new(
        config.runner_bin().clone(),
        config.timeout(),
    ));
    let state = ApiState::new(runner, config.model().clone(), config.index_page().clone());
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Completes when Ctrl+C is received.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    info!("Shutdown signal received");
}
