//! Pack Ledger
//!
//! Bundles allocated reward supply under a pack id and owner.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::address::Address;
use crate::error::{AirdropError, AirdropResult, Missing};
use super::reward::{RewardId, RewardRegistry};

/// Pack identifier, assigned sequentially from zero.
pub type PackId = u64;

/// A created pack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    /// Ledger-assigned id.
    pub id: PackId,
    /// Creator and administrator of the pack.
    pub owner: Address,
    /// Metadata URI.
    pub uri: String,
    /// Reward id -> units allocated to this pack. Immutable after creation.
    pub allocation: BTreeMap<RewardId, u64>,
}

impl Pack {
    /// Total reward units bundled in this pack.
    pub fn total_units(&self) -> u64 {
        self.allocation.values().sum()
    }
}

/// Arena of packs indexed by id.
#[derive(Debug, Default)]
pub struct PackLedger {
    packs: Vec<Pack>,
}

impl PackLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pack, consuming supply from `registry`.
    ///
    /// Nothing is allocated unless every (reward, supply) pair is valid.
    pub fn create_pack(
        &mut self,
        registry: &mut RewardRegistry,
        owner: Address,
        uri: &str,
        reward_ids: &[RewardId],
        supplies: &[u64],
    ) -> AirdropResult<PackId> {
        if reward_ids.len() != supplies.len() {
            return Err(AirdropError::invalid(format!(
                "reward ids and supplies length mismatch: {} vs {}",
                reward_ids.len(),
                supplies.len()
            )));
        }
        if reward_ids.is_empty() {
            return Err(AirdropError::invalid("pack must contain at least one reward"));
        }
        if let Some(i) = supplies.iter().position(|&s| s == 0) {
            return Err(AirdropError::invalid(format!("supply at index {} must be positive", i)));
        }

        let requests: Vec<(RewardId, u64)> = reward_ids
            .iter()
            .copied()
            .zip(supplies.iter().copied())
            .collect();
        registry.allocate(&requests)?;

        let mut allocation = BTreeMap::new();
        for (reward_id, supply) in requests {
            *allocation.entry(reward_id).or_insert(0) += supply;
        }

        let id = self.packs.len() as PackId;
        self.packs.push(Pack {
            id,
            owner,
            uri: uri.to_string(),
            allocation,
        });

        Ok(id)
    }

    /// Owner of a pack.
    pub fn owner(&self, pack_id: PackId) -> AirdropResult<Address> {
        self.get(pack_id)
            .map(|p| p.owner)
            .ok_or(AirdropError::NotFound(Missing::Pack(pack_id)))
    }

    /// Look up a pack.
    pub fn get(&self, pack_id: PackId) -> Option<&Pack> {
        usize::try_from(pack_id).ok().and_then(|i| self.packs.get(i))
    }

    /// Number of packs.
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    /// True if no pack exists.
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Iterate packs in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Pack> {
        self.packs.iter()
    }
}
