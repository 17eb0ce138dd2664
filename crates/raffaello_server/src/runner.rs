//! Model runner backed by the `ollama` command-line interface.

use crate::traits::ModelRunner;
use async_trait::async_trait;
use raffaello_core::RunOutput;
use raffaello_error::{RunnerError, RunnerErrorKind, RunnerResult};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs prompts by spawning `<binary> run <model> <prompt>`.
///
/// Each call spawns a fresh process and waits for it without blocking the
/// executor, so concurrent runs proceed independently. A run that exceeds
/// the deadline is killed rather than left running.
#[derive(Debug, Clone)]
pub struct OllamaRunner {
    /// Executable to spawn, resolved through `PATH` when not absolute.
    binary: String,
    /// Deadline for a single run.
    timeout: Duration,
}

impl OllamaRunner {
    /// Creates a runner for the given executable and per-run deadline.
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ModelRunner for OllamaRunner {
    async fn run(&self, model: &str, prompt: &str) -> RunnerResult<RunOutput> {
        let mut command = Command::new(&self.binary);
        command
            .arg("run")
            .arg(model)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping a timed-out wait must not leave the child running
            .kill_on_drop(true);

        debug!(binary = %self.binary, model = %model, "Spawning runner process");
        let child = command
            .spawn()
            .map_err(|e| RunnerError::new(RunnerErrorKind::Launch(e.to_string())))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(RunnerError::new(RunnerErrorKind::Wait(e.to_string())));
            }
            Err(_) => {
                warn!(
                    binary = %self.binary,
                    model = %model,
                    timeout_secs = self.timeout.as_secs(),
                    "Run exceeded deadline, killing process"
                );
                return Err(RunnerError::new(RunnerErrorKind::Timeout(
                    self.timeout.as_secs(),
                )));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let exit_code = output.status.code().unwrap_or(-1);

        Ok(RunOutput::new(exit_code, stdout, stderr))
    }
}
