//! Error handling for numeral conversion
//!
//! Lenient conversion never fails. These errors come from the strict
//! unknown-symbol policy, the concurrent pipeline's task plumbing and
//! configuration loading.

use thiserror::Error;

use crate::pipeline::PipelineStage;

/// Main error type for conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unrecognized numeral symbol '{symbol}' at offset {offset}")]
    UnrecognizedSymbol { symbol: String, offset: usize },

    #[error("{stage} stage did not complete: {source}")]
    StageJoin {
        stage: PipelineStage,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("Failed to start pipeline runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: &str, expected: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_symbol_message() {
        let err = ConvertError::UnrecognizedSymbol {
            symbol: "Z".to_string(),
            offset: 3,
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized numeral symbol 'Z' at offset 3"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: ConvertError =
            ConfigError::invalid("ROMAN_CHANNEL_CAPACITY", "lots", "a positive integer").into();
        assert!(matches!(err, ConvertError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value 'lots' for ROMAN_CHANNEL_CAPACITY: expected a positive integer"
        );
    }
}
