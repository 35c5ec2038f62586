//! Configuration management.
//!
//! Settings come from the command line, then an optional TOML file, then
//! built-in defaults, in that order of precedence.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};
use serde::Deserialize;
use zone_sync_probe::{CheckRequest, Thresholds, DEFAULT_QUERY_TIMEOUT_SECS};

use crate::args::Cli;

/// Contents of the optional config file.
///
/// ```toml
/// domain = "example.com"
/// warning = 2
/// critical = 1
/// hidden-primaries = ["primary.example.net"]
/// timeout = 5
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub domain: Option<String>,
    pub warning: Option<usize>,
    pub critical: Option<usize>,
    pub hidden_primaries: Vec<String>,
    /// Per-query timeout in seconds.
    pub timeout: Option<u64>,
}

impl FileConfig {
    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Fully resolved settings for one probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub request: CheckRequest,
    pub query_timeout: Duration,
}

impl Settings {
    /// Load the config file named on the command line (if any) and merge.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let domain = cli
            .domain
            .clone()
            .or(file.domain)
            .ok_or_else(|| anyhow!("No domain given, use --domain or set `domain` in the config file"))?;

        let warning = cli
            .warning
            .or(file.warning)
            .unwrap_or(Thresholds::DEFAULT_WARNING);
        let critical = cli
            .critical
            .or(file.critical)
            .unwrap_or(Thresholds::DEFAULT_CRITICAL);
        ensure!(warning >= 1, "Warning threshold must be at least 1");
        ensure!(critical >= 1, "Critical threshold must be at least 1");

        let timeout = cli
            .timeout
            .or(file.timeout)
            .unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS);
        ensure!(timeout >= 1, "Timeout must be at least 1 second");

        let hidden_primaries = if cli.hidden_primaries.is_empty() {
            file.hidden_primaries
        } else {
            cli.hidden_primaries.clone()
        };

        Ok(Self {
            request: CheckRequest::new(domain)
                .with_hidden_primaries(hidden_primaries)
                .with_thresholds(Thresholds::new(warning, critical)),
            query_timeout: Duration::from_secs(timeout),
        })
    }
}
