//! Converter configuration
//!
//! Loaded from environment variables, falling back to defaults:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `ROMAN_PIPELINE_MODE` | `sequential`, `concurrent` | `sequential` |
//! | `ROMAN_UNKNOWN_SYMBOLS` | `zero`, `reject` | `zero` |
//! | `ROMAN_CHANNEL_CAPACITY` | non-negative integer, 0 means 1 | `1` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::numeral::UnknownSymbolPolicy;

pub const MODE_VAR: &str = "ROMAN_PIPELINE_MODE";
pub const UNKNOWN_SYMBOLS_VAR: &str = "ROMAN_UNKNOWN_SYMBOLS";
pub const CHANNEL_CAPACITY_VAR: &str = "ROMAN_CHANNEL_CAPACITY";

/// Smallest capacity tokio channels accept; the nearest thing to a hand-off
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1;

/// How the pipeline stages are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// One iterator chain on the calling thread (default)
    #[default]
    Sequential,
    /// Tokio tasks joined by channels, one task per symbol valuation
    Concurrent,
}

impl PipelineMode {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineMode::Sequential => "sequential",
            PipelineMode::Concurrent => "concurrent",
        }
    }
}

impl FromStr for PipelineMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "seq" => Ok(PipelineMode::Sequential),
            "concurrent" | "pipelined" => Ok(PipelineMode::Concurrent),
            other => Err(ConfigError::invalid(
                "pipeline mode",
                other,
                "one of sequential, seq, concurrent, pipelined",
            )),
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for a [`crate::Converter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub mode: PipelineMode,
    pub unknown_symbols: UnknownSymbolPolicy,
    /// Capacity of each inter-stage channel in concurrent mode
    pub channel_capacity: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::Sequential,
            unknown_symbols: UnknownSymbolPolicy::Zero,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ConverterConfig {
    /// Load from `ROMAN_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup, using defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(MODE_VAR) {
            config.mode = value
                .parse()
                .map_err(|_| ConfigError::invalid(MODE_VAR, &value, "sequential or concurrent"))?;
        }

        if let Some(value) = lookup(UNKNOWN_SYMBOLS_VAR) {
            config.unknown_symbols = value
                .parse()
                .map_err(|_| ConfigError::invalid(UNKNOWN_SYMBOLS_VAR, &value, "zero or reject"))?;
        }

        if let Some(value) = lookup(CHANNEL_CAPACITY_VAR) {
            let capacity = value.trim().parse::<usize>().map_err(|_| {
                ConfigError::invalid(CHANNEL_CAPACITY_VAR, &value, "a non-negative integer")
            })?;
            config = config.with_channel_capacity(capacity);
        }

        Ok(config)
    }

    pub fn with_mode(mut self, mode: PipelineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_unknown_symbols(mut self, policy: UnknownSymbolPolicy) -> Self {
        self.unknown_symbols = policy;
        self
    }

    /// Set the channel capacity; 0 is raised to 1
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(DEFAULT_CHANNEL_CAPACITY);
        self
    }
}
