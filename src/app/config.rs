//! Application configuration
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional TOML file, then `FNPIPE_*` environment variables.
//!
//! ```toml
//! log_level = "debug"
//! sum_target = 20000
//!
//! [timings]
//! dispatch_delay = "250ms"
//! deletion_delay = "2s"
//! ```

use crate::demos::{DemoContext, DEFAULT_SUM_TARGET};
use crate::usecase::PipelineTimings;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DISPATCH_DELAY_ENV: &str = "FNPIPE_DISPATCH_DELAY_MS";
pub const LOG_LEVEL_ENV: &str = "FNPIPE_LOG_LEVEL";

/// Contents of a configuration file; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub log_level: Option<String>,
    pub sum_target: Option<u64>,
    #[serde(default)]
    pub timings: PipelineTimings,
}

impl ConfigFile {
    pub fn parse(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Location of the per-user configuration file
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "fnpipe", "fnpipe").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Filter directive that replaces the verbosity mapping when set
    pub log_level: Option<String>,
    /// Delays used by the transaction pipelines
    pub timings: PipelineTimings,
    /// Upper bound of the sum demos
    pub sum_target: u64,
}

impl AppConfig {
    /// Create a configuration with defaults for everything but verbosity
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Load configuration for a run
    ///
    /// An explicitly given file must exist. The default file is used only if
    /// present.
    pub fn load(verbose: u8, explicit_path: Option<&Path>) -> Result<Self> {
        let file = match explicit_path {
            Some(path) => Some(read_config_file(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(read_config_file(&path)?),
                _ => None,
            },
        };

        let mut config = Self::new(verbose);
        if let Some(file) = file {
            config = config.with_file(file);
        }
        config.merge_env_vars()?;
        Ok(config)
    }

    /// Apply the values set in a configuration file
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if file.log_level.is_some() {
            self.log_level = file.log_level;
        }
        if let Some(target) = file.sum_target {
            self.sum_target = target;
        }
        self.timings = file.timings;
        self
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = var(LOG_LEVEL_ENV) {
            self.log_level = Some(level);
        }

        if let Some(delay) = var(DISPATCH_DELAY_ENV) {
            let millis: u64 = delay.trim().parse().map_err(|e| {
                crate::Error::Config(format!(
                    "{DISPATCH_DELAY_ENV} must be a number of milliseconds: {e}"
                ))
            })?;
            self.timings.dispatch_delay = Duration::from_millis(millis);
        }

        Ok(())
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &str {
        if let Some(level) = &self.log_level {
            return level;
        }

        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn demo_context(&self) -> DemoContext {
        DemoContext {
            timings: self.timings.clone(),
            sum_target: self.sum_target,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            log_level: None,
            timings: PipelineTimings::default(),
            sum_target: DEFAULT_SUM_TARGET,
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let file = ConfigFile::parse(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    debug!(path = %path.display(), "configuration file loaded");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_log_level_follows_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(3).log_level(), "trace");

        let config = AppConfig {
            log_level: Some("fnpipe=trace".to_string()),
            ..AppConfig::new(0)
        };
        assert_eq!(config.log_level(), "fnpipe=trace");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "sum_target = 100\n\n[timings]\ndispatch_delay = \"250ms\"\n",
        )
        .unwrap();

        let config = AppConfig::load(2, Some(&path)).unwrap();
        assert_eq!(config.verbose, 2);
        assert_eq!(config.sum_target, 100);
        assert_eq!(config.timings.dispatch_delay, Duration::from_millis(250));
        assert_eq!(config.timings.deletion_delay, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(0, Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ConfigFile::parse("sum_targett = 5").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            [(DISPATCH_DELAY_ENV, "20"), (LOG_LEVEL_ENV, "warn")].into();

        let mut config = AppConfig::default();
        config
            .merge_vars(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.timings.dispatch_delay, Duration::from_millis(20));
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn test_env_rejects_bad_delay() {
        let mut config = AppConfig::default();
        let result = config.merge_vars(|key| {
            (key == DISPATCH_DELAY_ENV).then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
