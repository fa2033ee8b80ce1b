//! # Pack Airdrop
//!
//! Reward pool, pack ledger and Merkle airdrop claim verifier.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PACK AIRDROP                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── hash.rs     - Leaf/node hashing (keccak-256, sha-256)   │
//! │  └── address.rs  - 20-byte account addresses                 │
//! │                                                              │
//! │  ledger/         - Reward pool                               │
//! │  ├── reward.rs   - Reward registry and supply accounting     │
//! │  └── pack.rs     - Packs and allocations                     │
//! │                                                              │
//! │  proof/          - Eligibility                               │
//! │  ├── merkle.rs   - Sorted-pair tree builder                  │
//! │  ├── commitment.rs - Per-pack roots and claimed set          │
//! │  └── verify.rs   - Proof verification and claims             │
//! │                                                              │
//! │  backend.rs      - Custody/minting collaborator              │
//! │  center.rs       - Shared, lock-guarded entry point          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Flow
//!
//! creator → `create_*_rewards` → `create_pack` → `set_merkle_root`,
//! then claimant → `claim_airdrop` → backend mints one pack unit.
//!
//! ## Guarantees
//!
//! - Allocations of a reward across all packs never exceed its supply
//! - Each (pack, address) claims at most once, across root rotations
//! - Every failed operation leaves state unchanged

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod backend;
pub mod center;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod ledger;
pub mod proof;

// Re-export commonly used types
pub use backend::{CustodyError, InMemoryTokenBackend, MintError, TokenBackend};
pub use center::AirdropCenter;
pub use config::AirdropConfig;
pub use crate::core::{Address, Hash32, HashAlgorithm};
pub use error::{AirdropError, AirdropResult, ErrorKind};
pub use ledger::{Pack, PackId, Reward, RewardId, RewardKind};
pub use proof::{ClaimReceipt, SortedMerkleTree};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
