//! HTTP gateway that runs prompts through a local Ollama CLI.
//!
//! The crate wires a small axum app around a [`ModelRunner`]: a prompt
//! arrives over HTTP, the runner executes it as a subprocess, and whatever
//! the run produced goes back to the caller with timing metadata.

mod api;
mod config;
mod runner;
mod traits;

pub use api::{ApiError, ApiState, create_router};
pub use config::{
    DEFAULT_BIND, DEFAULT_INDEX_PAGE, DEFAULT_MODEL, DEFAULT_RUNNER_BIN, DEFAULT_TIMEOUT_SECS,
    GatewayConfig, GatewayConfigBuilder,
};
pub use runner::OllamaRunner;
pub use traits::ModelRunner;
