//! Trait interface for model runner implementations
//!
//! The gateway talks to its backend through [`ModelRunner`] so that the
//! HTTP layer never depends on how a run is actually executed.

use async_trait::async_trait;
use raffaello_core::RunOutput;
use raffaello_error::RunnerResult;

/// Trait for running a prompt through a local model backend
///
/// Implementations execute one run per call and collect everything the
/// backend produced. Calls must be independent: a slow run in one task
/// must not delay runs issued from other tasks.
#[async_trait]
pub trait ModelRunner: Send + Sync {
    /// Run a prompt through the named model
    ///
    /// Returns `Ok` for any run that produced an exit code, whatever that
    /// code is; exit-code policy belongs to the caller. Returns an error
    /// only when the run could not be launched, exceeded its deadline, or
    /// its output could not be collected.
    async fn run(&self, model: &str, prompt: &str) -> RunnerResult<RunOutput>;
}
