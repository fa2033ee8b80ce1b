//! Eligibility Commitments
//!
//! One Merkle root per pack plus the set of (pack, address) pairs that have
//! already claimed. Claims are keyed by pack id, not by root, so replacing a
//! root never re-opens a claim.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::address::Address;
use crate::core::hash::Hash32;
use crate::error::{AirdropError, AirdropResult};
use crate::ledger::{PackId, PackLedger};

/// Committed roots and the replay guard.
#[derive(Debug, Default)]
pub struct CommitmentStore {
    roots: BTreeMap<PackId, Hash32>,
    claimed: BTreeSet<(PackId, Address)>,
}

impl CommitmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the root for a pack. Only the pack owner may do this.
    ///
    /// Returns the previous root, if any. The claimed set is untouched.
    pub fn set_merkle_root(
        &mut self,
        packs: &PackLedger,
        caller: Address,
        pack_id: PackId,
        root: Hash32,
    ) -> AirdropResult<Option<Hash32>> {
        let owner = packs.owner(pack_id)?;
        if caller != owner {
            return Err(AirdropError::Unauthorized { caller, pack_id });
        }
        Ok(self.roots.insert(pack_id, root))
    }

    /// Current root of a pack.
    pub fn root(&self, pack_id: PackId) -> Option<Hash32> {
        self.roots.get(&pack_id).copied()
    }

    /// Whether `address` has claimed for `pack_id`.
    pub fn has_claimed(&self, pack_id: PackId, address: &Address) -> bool {
        self.claimed.contains(&(pack_id, *address))
    }

    /// Record a claim. Returns false if it was already recorded.
    pub(crate) fn mark_claimed(&mut self, pack_id: PackId, address: Address) -> bool {
        self.claimed.insert((pack_id, address))
    }

    /// Number of claims recorded for a pack.
    pub fn claim_count(&self, pack_id: PackId) -> usize {
        self.claimed.range((pack_id, Address::ZERO)..=(pack_id, Address::new([0xFF; 20]))).count()
    }
}
