//! Configuration for the gateway server.

use raffaello_error::{ConfigError, ConfigErrorKind, ConfigResult};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default address and port the server listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
/// Default runner executable, resolved through `PATH`.
pub const DEFAULT_RUNNER_BIN: &str = "ollama";
/// Default model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-oss:20b";
/// Default deadline for a single run, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Default page served at the root route.
pub const DEFAULT_INDEX_PAGE: &str = "static/index.html";

/// Configuration for the gateway server.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GatewayConfig {
    /// Address and port to listen on (e.g., "127.0.0.1:8000")
    bind: String,
    /// Runner executable to spawn for each request
    runner_bin: String,
    /// Model used when a request does not name one
    model: String,
    /// Seconds a single run may take before it is killed
    timeout_secs: u64,
    /// HTML page served at the root route
    index_page: PathBuf,
}

impl GatewayConfig {
    /// Returns a builder for constructing a GatewayConfig.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `RAFFAELLO_BIND` (default: "127.0.0.1:8000")
    /// - `RAFFAELLO_RUNNER_BIN` (default: "ollama")
    /// - `RAFFAELLO_MODEL` (default: "gpt-oss:20b")
    /// - `RAFFAELLO_TIMEOUT_SECS` (default: 300)
    /// - `RAFFAELLO_INDEX_PAGE` (default: "static/index.html")
    pub fn from_env() -> ConfigResult<Self> {
        let bind = std::env::var("RAFFAELLO_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let runner_bin =
            std::env::var("RAFFAELLO_RUNNER_BIN").unwrap_or_else(|_| DEFAULT_RUNNER_BIN.to_string());
        let model = std::env::var("RAFFAELLO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = match std::env::var("RAFFAELLO_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::new(ConfigErrorKind::InvalidTimeout(raw)))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        let index_page = std::env::var("RAFFAELLO_INDEX_PAGE")
            .unwrap_or_else(|_| DEFAULT_INDEX_PAGE.to_string());

        let config = GatewayConfigBuilder::default()
            .bind(bind)
            .runner_bin(runner_bin)
            .model(model)
            .timeout_secs(timeout_secs)
            .index_page(index_page)
            .build()
            .expect("Valid GatewayConfig");
        config.validate()?;
        Ok(config)
    }

    /// Checks the parts of the config that can be malformed.
    pub fn validate(&self) -> ConfigResult<()> {
        self.socket_addr()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::new(ConfigErrorKind::InvalidTimeout(
                "must be at least one second".into(),
            )));
        }
        Ok(())
    }

    /// Parses the bind address into a socket address.
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.bind.parse().map_err(|e| {
            ConfigError::new(ConfigErrorKind::InvalidBind(format!("{}: {}", self.bind, e)))
        })
    }

    /// Deadline for a single run.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
