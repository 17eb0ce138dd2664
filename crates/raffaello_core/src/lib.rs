//! Core data types for the Raffaello Ollama gateway.
//!
//! This crate provides the wire types exchanged with callers, the internal
//! process-output record, and the elapsed-time formatter.

mod elapsed;
mod request;
mod response;
mod run_output;

pub use elapsed::format_elapsed;
pub use request::GenerateRequest;
pub use response::{GenerateResponse, RunFailure};
pub use run_output::RunOutput;
