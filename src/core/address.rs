//! Account Addresses
//!
//! 20-byte account identifiers for creators, claimants and token contracts.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use super::hash::{Hash32, HashAlgorithm};

/// A 20-byte account address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0; 20]);

    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Eligibility leaf for this address: hash of its 20 raw bytes.
    pub fn leaf(&self, algorithm: HashAlgorithm) -> Hash32 {
        algorithm.hash(&self.0)
    }

    /// Short hex prefix for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

/// Address parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// Wrong number of hex characters.
    #[error("invalid address length: expected 40 hex chars, got {0}")]
    InvalidLength(usize),
    /// Non-hex characters.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if cleaned.len() != 40 {
            return Err(AddressParseError::InvalidLength(cleaned.len()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(cleaned, &mut bytes)
            .map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_prefix() {
        let addr: Address = "0x1234567890abcdef1234567890abcdef12345678".parse().unwrap();
        assert_eq!(addr.0[0], 0x12);
        assert_eq!(addr.0[19], 0x78);
    }

    #[test]
    fn test_parse_without_prefix() {
        let addr: Address = "1234567890abcdef1234567890abcdef12345678".parse().unwrap();
        assert_eq!(addr.to_string(), "0x1234567890abcdef1234567890abcdef12345678");
    }

    #[test]
    fn test_parse_invalid_length() {
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::InvalidLength(4))
        );
    }

    #[test]
    fn test_parse_invalid_hex() {
        let result = "0xzz34567890abcdef1234567890abcdef12345678".parse::<Address>();
        assert!(matches!(result, Err(AddressParseError::InvalidHex(_))));
    }

    #[test]
    fn test_leaf_hashes_raw_bytes() {
        let addr = Address::new([7; 20]);
        assert_eq!(
            addr.leaf(HashAlgorithm::Keccak256),
            HashAlgorithm::Keccak256.hash(&[7; 20])
        );
        assert_ne!(addr.leaf(HashAlgorithm::Keccak256), addr.leaf(HashAlgorithm::Sha256));
    }
}
