//! Configuration types for arkts-lint.

use crate::fault::FaultId;
use crate::options::LinterOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for arkts-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Linter behaviour switches.
    #[serde(default)]
    pub linter: LinterOptions,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown rule.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        if let Some(unknown) = config.rules.keys().find(|k| FaultId::parse(k).is_none()) {
            return Err(ConfigError::UnknownRule {
                name: unknown.clone(),
            });
        }
        Ok(config)
    }

    fn rule_config(&self, rule: FaultId) -> Option<&RuleConfig> {
        self.rules.iter().find_map(|(k, v)| (FaultId::parse(k) == Some(rule)).then_some(v))
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: FaultId) -> bool {
        self.rule_config(rule)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule: FaultId) -> Option<crate::Severity> {
        self.rule_config(rule).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns of program files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// SDK whitelist JSON.
    #[serde(default)]
    pub whitelist: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/oh_modules/**".to_string(), "**/build/**".to_string()],
            whitelist: None,
        }
    }
}

impl AnalyzerConfig {
    /// Returns true if `path` matches an exclude pattern.
    #[must_use]
    pub fn is_excluded(&self, path: &std::path::Path) -> bool {
        let normalized = crate::utils::paths::normalize_path(path);
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&normalized))
        })
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A `[rules.<name>]` table names no known rule.
    #[error("Unknown rule `{name}` in config")]
    UnknownRule {
        /// The unknown key.
        name: String,
    },
}
