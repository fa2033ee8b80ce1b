//! Core primitives.
//!
//! Hashes and addresses shared by the ledger and the proof system.

pub mod address;
pub mod hash;

// Re-export core types
pub use address::{Address, AddressParseError};
pub use hash::{Hash32, HashAlgorithm};
