//! Response bodies for prompt generation.

use serde::{Deserialize, Serialize};

/// Fixed label carried by every gateway failure body.
const RUN_FAILED_LABEL: &str = "Ollama run failed";

/// Placeholder reported when a failed run produced no standard error.
const NO_STDERR_PLACEHOLDER: &str = "(no stderr)";

/// Exit code reported when the invocation never produced one.
const NO_EXIT_CODE: i32 = -1;

/// A successful generation, with timing metadata for the run.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateResponse {
    /// Generated text from the model (may be empty)
    output: String,
    /// Model that was used
    model: String,
    /// Invocation start time as an ISO-8601 UTC string
    start_time_human: String,
    /// Invocation start time as floating-point seconds since the epoch
    start_time_unix: f64,
    /// Wall-clock run duration in milliseconds, rounded to 2 decimals
    duration_ms: f64,
    /// Run duration formatted by [`format_elapsed`](crate::format_elapsed)
    duration_human: String,
}

impl GenerateResponse {
    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }
}

/// Body of a gateway failure response.
///
/// Every failed run (non-zero exit, timeout, or launch failure) surfaces
/// to the caller in this shape, under a fixed error label.
///
/// # Examples
///
/// ```
/// use raffaello_core::RunFailure;
///
/// let failure = RunFailure::from_run("model error", 1);
/// assert_eq!(failure.stderr(), "model error");
/// assert_eq!(*failure.return_code(), 1);
///
/// let aborted = RunFailure::aborted();
/// assert_eq!(aborted.stderr(), "(no stderr)");
/// assert_eq!(*aborted.return_code(), -1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct RunFailure {
    /// Fixed error label
    error: String,
    /// Captured standard error, or a placeholder when empty
    stderr: String,
    /// Process exit code, or -1 when the invocation never produced one
    return_code: i32,
}

impl RunFailure {
    /// Failure body for a process that completed with a non-zero exit code.
    ///
    /// An empty stderr capture is replaced by the `"(no stderr)"`
    /// placeholder so the caller always receives a non-empty field.
    pub fn from_run(stderr: impl Into<String>, return_code: i32) -> Self {
        let stderr = stderr.into();
        let stderr = if stderr.is_empty() {
            NO_STDERR_PLACEHOLDER.to_string()
        } else {
            stderr
        };
        Self {
            error: RUN_FAILED_LABEL.to_string(),
            stderr,
            return_code,
        }
    }

    /// Failure body for an invocation that never completed, whether launch
    /// failure or timeout, so no stderr and no exit code were captured.
    pub fn aborted() -> Self {
        Self {
            error: RUN_FAILED_LABEL.to_string(),
            stderr: NO_STDERR_PLACEHOLDER.to_string(),
            return_code: NO_EXIT_CODE,
        }
    }
}
