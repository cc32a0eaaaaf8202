use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graph::DuplicatePolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub kinship: KinshipConfig,
    #[serde(default)]
    pub store: DuplicatePolicy,
    #[serde(default)]
    pub rules: RulesConfig,
    /// Label overrides keyed by `<gender initial>.<path>`, e.g. `"m.ppp" = "great-grandfather"`
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Kinship-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KinshipConfig {
    /// Population file (TOML) loaded by the CLI.
    #[serde(default = "default_population")]
    pub population: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self {
            population: default_population(),
            log_level: default_log_level(),
        }
    }
}

/// Reciprocal rule configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Register the stock family rule table before the population's own rules.
    #[serde(default = "default_true")]
    pub use_stock_rules: bool,
    /// Propagate reciprocals of reciprocals back to the declaring entity.
    #[serde(default = "default_true")]
    pub second_order: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            use_stock_rules: true,
            second_order: true,
        }
    }
}

fn default_population() -> PathBuf {
    PathBuf::from("population.toml")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace", "off"];

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in KINSHIP_CONFIG environment variable (must exist)
    /// 2. ./kinship.toml in current directory (defaults are used when absent)
    ///
    /// Runs before the logger is initialized (the log level comes from here), so it does
    /// not log.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config = match std::env::var("KINSHIP_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let path = Path::new("kinship.toml");
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;

        Ok(config)
    }

    /// Read and parse a config file without validating it
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let level = self.kinship.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "kinship.log_level must be one of {:?}, got '{}'",
                LOG_LEVELS,
                self.kinship.log_level
            );
        }

        for key in self.labels.keys() {
            let valid = key.split_once('.').map_or(false, |(gender, path)| {
                gender.chars().count() == 1
                    && gender.chars().all(char::is_lowercase)
                    && !path.is_empty()
                    && path.chars().all(|c| matches!(c, 'p' | 'c' | 's' | 'S'))
            });
            if !valid {
                anyhow::bail!(
                    "labels key '{}' must look like '<lowercase gender initial>.<path>' with path symbols p, c, s, S",
                    key
                );
            }
        }

        Ok(())
    }

    /// Get population file path
    pub fn population_path(&self) -> &Path {
        &self.kinship.population
    }
}
