//! Hashing for Merkle Commitments
//!
//! Provides the fixed-width hash type and the collision-resistant functions
//! used to build eligibility leaves and combine tree nodes.
//!
//! Nodes are always combined in sorted order (smaller operand first), so a
//! proof carries only sibling hashes and never a left/right flag.

use serde::{Serialize, Deserialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Hash output type (256 bits / 32 bytes)
pub type Hash32 = [u8; 32];

/// Hash function used for leaves and internal nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// Keccak-256, as used by EVM-side tree builders.
    #[default]
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl HashAlgorithm {
    /// Hash arbitrary bytes.
    pub fn hash(self, data: &[u8]) -> Hash32 {
        match self {
            Self::Keccak256 => Keccak256::digest(data).into(),
            Self::Sha256 => Sha256::digest(data).into(),
        }
    }

    /// Hash two nodes, smaller operand first.
    pub fn hash_sorted_pair(self, a: &Hash32, b: &Hash32) -> Hash32 {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        match self {
            Self::Keccak256 => Keccak256::new()
                .chain_update(first)
                .chain_update(second)
                .finalize()
                .into(),
            Self::Sha256 => Sha256::new()
                .chain_update(first)
                .chain_update(second)
                .finalize()
                .into(),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(Self::Keccak256),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unknown hash algorithm: {}", other)),
        }
    }
}

/// Render a hash as `0x`-prefixed hex.
pub fn to_hex(hash: &Hash32) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a `0x`-prefixed (or bare) 64-char hex string into a hash.
pub fn from_hex(s: &str) -> Result<Hash32, hex::FromHexError> {
    let cleaned = s.trim();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(cleaned);
    let mut out = [0u8; 32];
    hex::decode_to_slice(cleaned, &mut out)?;
    Ok(out)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_vector() {
        // keccak256("") is a well-known constant
        let h = HashAlgorithm::Keccak256.hash(b"");
        assert_eq!(
            hex::encode(h),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha256_known_vector() {
        let h = HashAlgorithm::Sha256.hash(b"abc");
        assert_eq!(
            hex::encode(h),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sorted_pair_is_commutative() {
        let a = [1u8; 32];
        let b = [2u8; 32];

        for algo in [HashAlgorithm::Keccak256, HashAlgorithm::Sha256] {
            assert_eq!(algo.hash_sorted_pair(&a, &b), algo.hash_sorted_pair(&b, &a));
        }
    }

    #[test]
    fn test_sorted_pair_matches_manual_concat() {
        let a = [9u8; 32];
        let b = [3u8; 32];

        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(&b);
        concat.extend_from_slice(&a);

        assert_eq!(
            HashAlgorithm::Keccak256.hash_sorted_pair(&a, &b),
            HashAlgorithm::Keccak256.hash(&concat)
        );
    }

    #[test]
    fn test_algorithms_differ() {
        let data = [1u8, 2, 3, 4];
        assert_ne!(
            HashAlgorithm::Keccak256.hash(&data),
            HashAlgorithm::Sha256.hash(&data)
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let h = HashAlgorithm::Sha256.hash(b"root");
        let s = to_hex(&h);
        assert!(s.starts_with("0x"));
        assert_eq!(from_hex(&s).unwrap(), h);
        assert!(from_hex("0x1234").is_err());
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("KECCAK256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Keccak256);
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }
}
