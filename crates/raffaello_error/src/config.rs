//! Configuration error types.

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    /// The bind address could not be parsed
    InvalidBind(String),
    /// The invocation timeout is not a positive number of seconds
    InvalidTimeout(String),
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorKind::InvalidBind(msg) => write!(f, "Invalid bind address: {}", msg),
            ConfigErrorKind::InvalidTimeout(msg) => {
                write!(f, "Invalid invocation timeout: {}", msg)
            }
        }
    }
}

/// Configuration error with source location tracking.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given kind at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for ConfigError {}
