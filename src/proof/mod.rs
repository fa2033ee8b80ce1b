//! Airdrop Proof System
//!
//! Eligibility is committed as a Merkle root per pack and redeemed with
//! inclusion proofs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  merkle.rs       - Sorted-pair Merkle tree builder          │
//! │  commitment.rs   - Per-pack roots and the claimed set       │
//! │  verify.rs       - Proof folding and one-time claims        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod commitment;
pub mod merkle;
pub mod verify;

// Re-export key types
pub use commitment::CommitmentStore;
pub use merkle::SortedMerkleTree;
pub use verify::{process_proof, verify_sorted_proof, ClaimReceipt, ClaimVerifier};
