//! Claim Verification
//!
//! Checks a claimant's inclusion proof against the committed root and
//! performs the one-time claim: check, verify, mint, mark.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::backend::TokenBackend;
use crate::core::address::Address;
use crate::core::hash::{to_hex, Hash32, HashAlgorithm};
use crate::error::{AirdropError, AirdropResult, Missing};
use crate::ledger::PackId;
use crate::proof::commitment::CommitmentStore;

/// Fold a proof over a leaf, hashing each pair smaller-first.
pub fn process_proof(algorithm: HashAlgorithm, proof: &[Hash32], leaf: Hash32) -> Hash32 {
    proof
        .iter()
        .fold(leaf, |computed, sibling| algorithm.hash_sorted_pair(&computed, sibling))
}

/// True if `proof` links `leaf` to `root`.
pub fn verify_sorted_proof(algorithm: HashAlgorithm, proof: &[Hash32], root: &Hash32, leaf: Hash32) -> bool {
    process_proof(algorithm, proof, leaf) == *root
}

/// Record of a successful claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    /// Pack claimed.
    pub pack_id: PackId,
    /// Address that received the pack unit.
    pub claimant: Address,
    /// Root the proof was verified against.
    pub root: Hash32,
    /// When the claim was accepted.
    pub claimed_at: DateTime<Utc>,
}

/// Verifies proofs and enforces single-claim semantics.
#[derive(Clone, Copy, Debug)]
pub struct ClaimVerifier {
    algorithm: HashAlgorithm,
    max_proof_depth: usize,
}

impl ClaimVerifier {
    /// Create a verifier.
    pub fn new(algorithm: HashAlgorithm, max_proof_depth: usize) -> Self {
        Self { algorithm, max_proof_depth }
    }

    /// Hash algorithm used for leaves and nodes.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Claim one pack unit for `claimant`.
    ///
    /// The caller must hold exclusive access to `commitments` for the whole
    /// call. The claim is recorded only after the mint succeeds.
    pub fn claim_airdrop(
        &self,
        commitments: &mut CommitmentStore,
        backend: &dyn TokenBackend,
        pack_id: PackId,
        claimant: Address,
        proof: &[Hash32],
    ) -> AirdropResult<ClaimReceipt> {
        let root = commitments
            .root(pack_id)
            .ok_or(AirdropError::NotFound(Missing::Commitment(pack_id)))?;

        if commitments.has_claimed(pack_id, &claimant) {
            warn!("replayed claim for pack {} by {}", pack_id, claimant);
            return Err(AirdropError::AlreadyClaimed { pack_id, claimant });
        }

        if proof.len() > self.max_proof_depth {
            return Err(AirdropError::invalid(format!(
                "proof has {} elements, limit is {}",
                proof.len(),
                self.max_proof_depth
            )));
        }

        let leaf = claimant.leaf(self.algorithm);
        let computed = process_proof(self.algorithm, proof, leaf);

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(
            "claim proof for {}: leaf {} computed {} root {}",
            claimant,
            to_hex(&leaf),
            to_hex(&computed),
            to_hex(&root)
        );

        if computed != root {
            debug!(
                "proof for {} resolved to {}, expected {}",
                claimant.short(),
                to_hex(&computed),
                to_hex(&root)
            );
            warn!("ineligible claim for pack {} by {}", pack_id, claimant);
            return Err(AirdropError::NotEligible { pack_id, claimant });
        }

        backend.mint_pack_unit(claimant, pack_id)?;
        commitments.mark_claimed(pack_id, claimant);

        Ok(ClaimReceipt {
            pack_id,
            claimant,
            root,
            claimed_at: Utc::now(),
        })
    }
}
