//! Configuration
//!
//! Loaded from environment variables or a JSON file.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::hash::HashAlgorithm;

/// Default maximum number of proof siblings (trees of up to 2^64 leaves).
pub const DEFAULT_MAX_PROOF_DEPTH: usize = 64;

/// Airdrop ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirdropConfig {
    /// Hash function for leaves and nodes.
    pub hash_algorithm: HashAlgorithm,
    /// Proofs longer than this are rejected before hashing.
    pub max_proof_depth: usize,
    /// Log filter directive for the binary.
    pub log_filter: String,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Keccak256,
            max_proof_depth: DEFAULT_MAX_PROOF_DEPTH,
            log_filter: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable holds an unusable value.
    #[error("invalid value for {var}: {reason}")]
    InvalidVar {
        /// Variable name.
        var: &'static str,
        /// What was wrong.
        reason: String,
    },
    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AirdropConfig {
    /// Create config from environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("AIRDROP_HASH_ALGORITHM") {
            config.hash_algorithm = v.parse().map_err(|reason| ConfigError::InvalidVar {
                var: "AIRDROP_HASH_ALGORITHM",
                reason,
            })?;
        }
        if let Ok(v) = std::env::var("AIRDROP_MAX_PROOF_DEPTH") {
            config.max_proof_depth = v.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidVar {
                    var: "AIRDROP_MAX_PROOF_DEPTH",
                    reason: e.to_string(),
                }
            })?;
        }
        if let Ok(v) = std::env::var("AIRDROP_LOG_FILTER") {
            config.log_filter = v;
        }

        config.validate()
    }

    /// Parse config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Load config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_proof_depth == 0 {
            return Err(ConfigError::InvalidVar {
                var: "max_proof_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AirdropConfig::default();
        assert_eq!(config.hash_algorithm, HashAlgorithm::Keccak256);
        assert_eq!(config.max_proof_depth, DEFAULT_MAX_PROOF_DEPTH);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = AirdropConfig::from_json_str(r#"{"hash_algorithm":"Sha256"}"#).unwrap();
        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.max_proof_depth, DEFAULT_MAX_PROOF_DEPTH);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_json_rejects_zero_depth() {
        assert!(matches!(
            AirdropConfig::from_json_str(r#"{"max_proof_depth":0}"#),
            Err(ConfigError::InvalidVar { .. })
        ));
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(matches!(
            AirdropConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AirdropConfig::from_file("/nonexistent/airdrop.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
