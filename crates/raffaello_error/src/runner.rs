//! Model-runner error types.

/// Result type for model-runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Ways an external model-runner invocation can fail.
///
/// A process that starts and runs to completion is not an error at this
/// level, whatever its exit code; exit-code policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunnerErrorKind {
    /// The runner executable could not be started
    Launch(String),
    /// The run exceeded the configured deadline, in seconds
    Timeout(u64),
    /// Collecting the process output failed after launch
    Wait(String),
}

impl std::fmt::Display for RunnerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerErrorKind::Launch(msg) => write!(f, "Failed to launch runner: {}", msg),
            RunnerErrorKind::Timeout(secs) => {
                write!(f, "Run exceeded the {}s deadline", secs)
            }
            RunnerErrorKind::Wait(msg) => write!(f, "Failed to collect run output: {}", msg),
        }
    }
}

/// Model-runner error with source location tracking.
#[derive(Debug, Clone)]
pub struct RunnerError {
    /// The kind of error that occurred
    pub kind: RunnerErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl RunnerError {
    /// Create a new RunnerError with the given kind at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use raffaello_error::{RunnerError, RunnerErrorKind};
    ///
    /// let err = RunnerError::new(RunnerErrorKind::Timeout(300));
    /// assert_eq!(err.kind, RunnerErrorKind::Timeout(300));
    /// ```
    #[track_caller]
    pub fn new(kind: RunnerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Runner Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for RunnerError {}
