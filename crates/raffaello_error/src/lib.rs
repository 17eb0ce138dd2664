//! Error types for the Raffaello Ollama gateway.
//!
//! Each domain gets a kind enum describing what went wrong and an error
//! struct that captures the source location where it was raised.

mod config;
mod runner;

pub use config::{ConfigError, ConfigErrorKind, ConfigResult};
pub use runner::{RunnerError, RunnerErrorKind, RunnerResult};
