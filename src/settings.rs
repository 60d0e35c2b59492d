//! Runtime settings.
//!
//! Loaded from an optional TOML file, then `WGSTATUS_*` environment
//! variables; command-line flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use wgstatus_client::{BuildPolicy, HttpTransport, StatusError, DEFAULT_ENDPOINT};

/// Environment variable prefix, e.g. `WGSTATUS_ENDPOINT`.
pub const ENV_PREFIX: &str = "WGSTATUS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Status API URL.
    pub endpoint: String,
    /// Request deadline in seconds.
    pub timeout_secs: u64,
    /// Fail the whole poll on any bad record instead of skipping it.
    pub strict: bool,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
            strict: false,
            log_level: "info".to_string(),
            user_agent: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from `path` (if given) and an explicit environment source.
    pub fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder.add_source(env.try_parsing(true)).build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn policy(&self) -> BuildPolicy {
        if self.strict {
            BuildPolicy::Strict
        } else {
            BuildPolicy::Lenient
        }
    }

    /// Build the HTTP transport described by these settings.
    pub fn transport(&self) -> Result<HttpTransport, StatusError> {
        let mut builder = HttpTransport::builder()
            .endpoint(&self.endpoint)
            .timeout(self.timeout());
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}
