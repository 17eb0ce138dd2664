//! Captured output of a completed model-runner process.

/// What a model-runner process produced once it ran to completion.
///
/// Produced by the process invoker for any exit code; deciding whether a
/// non-zero code fails the request is the request handler's job. Consumed
/// immediately, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct RunOutput {
    /// Process exit code (-1 when terminated by a signal)
    exit_code: i32,
    /// Captured standard output, decoded as text
    stdout: String,
    /// Captured standard error, decoded as text
    stderr: String,
}

impl RunOutput {
    /// Creates a new run output record.
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
