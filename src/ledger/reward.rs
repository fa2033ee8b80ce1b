//! Reward Registry
//!
//! Stores reward definitions and tracks how much of each reward's supply has
//! been allocated to packs. Total supply never changes after registration.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::error;

use crate::backend::TokenBackend;
use crate::core::address::Address;
use crate::error::{AirdropError, AirdropResult, Missing};

/// Reward identifier, assigned sequentially from zero.
pub type RewardId = u64;

/// What a reward is backed by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    /// A single item held in custody from an external token contract.
    NonFungibleItem {
        /// Token contract address.
        token_contract: Address,
        /// Token id within the contract.
        token_id: u64,
        /// Metadata URI.
        uri: String,
    },
    /// A counted allocation accounted by the ledger itself.
    NativeAllocation {
        /// Display label.
        label: String,
    },
}

/// A registered reward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Registry-assigned id.
    pub id: RewardId,
    /// Address that registered the reward.
    pub creator: Address,
    /// Backing asset.
    pub kind: RewardKind,
    /// Immutable total supply.
    pub total_supply: u64,
}

/// Arena of rewards indexed by id.
#[derive(Debug, Default)]
pub struct RewardRegistry {
    rewards: Vec<Reward>,
    /// Units of each reward already allocated to packs (parallel to `rewards`).
    allocated: Vec<u64>,
}

impl RewardRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one non-fungible reward per token id, each with supply 1.
    ///
    /// Every item is taken into custody before any record is created. If any
    /// transfer fails, items already held are released back to `creator`.
    pub fn create_non_fungible_rewards(
        &mut self,
        backend: &dyn TokenBackend,
        creator: Address,
        token_contract: Address,
        token_ids: &[u64],
        uris: &[String],
    ) -> AirdropResult<Vec<RewardId>> {
        if token_ids.len() != uris.len() {
            return Err(AirdropError::invalid(format!(
                "token ids and uris length mismatch: {} vs {}",
                token_ids.len(),
                uris.len()
            )));
        }
        if token_ids.is_empty() {
            return Err(AirdropError::invalid("no token ids given"));
        }

        for (held, &token_id) in token_ids.iter().enumerate() {
            if let Err(e) = backend.hold_item(creator, token_contract, token_id) {
                for &undo in &token_ids[..held] {
                    if let Err(release_err) = backend.release_item(creator, token_contract, undo) {
                        error!(
                            "failed to release token {} back to {}: {}",
                            undo, creator, release_err
                        );
                    }
                }
                return Err(e.into());
            }
        }

        let ids = token_ids
            .iter()
            .zip(uris)
            .map(|(&token_id, uri)| {
                self.push(
                    creator,
                    RewardKind::NonFungibleItem {
                        token_contract,
                        token_id,
                        uri: uri.clone(),
                    },
                    1,
                )
            })
            .collect();

        Ok(ids)
    }

    /// Register one native reward per label.
    pub fn create_native_rewards(
        &mut self,
        creator: Address,
        labels: &[String],
        supplies: &[u64],
    ) -> AirdropResult<Vec<RewardId>> {
        if labels.len() != supplies.len() {
            return Err(AirdropError::invalid(format!(
                "labels and supplies length mismatch: {} vs {}",
                labels.len(),
                supplies.len()
            )));
        }
        if labels.is_empty() {
            return Err(AirdropError::invalid("no labels given"));
        }
        if let Some(i) = supplies.iter().position(|&s| s == 0) {
            return Err(AirdropError::invalid(format!("supply at index {} must be positive", i)));
        }

        let ids = labels
            .iter()
            .zip(supplies)
            .map(|(label, &supply)| {
                self.push(creator, RewardKind::NativeAllocation { label: label.clone() }, supply)
            })
            .collect();

        Ok(ids)
    }

    fn push(&mut self, creator: Address, kind: RewardKind, total_supply: u64) -> RewardId {
        let id = self.rewards.len() as RewardId;
        self.rewards.push(Reward { id, creator, kind, total_supply });
        self.allocated.push(0);
        id
    }

    /// Total supply minus everything allocated to packs.
    pub fn remaining_supply(&self, reward_id: RewardId) -> AirdropResult<u64> {
        let idx = self.index(reward_id)?;
        Ok(self.rewards[idx].total_supply - self.allocated[idx])
    }

    /// Allocate supply for a batch of (reward, amount) requests.
    ///
    /// Amounts for a repeated reward id are summed. Either every request is
    /// applied or none is.
    pub fn allocate(&mut self, requests: &[(RewardId, u64)]) -> AirdropResult<()> {
        let mut totals: BTreeMap<RewardId, u64> = BTreeMap::new();
        for &(reward_id, amount) in requests {
            let total = totals.entry(reward_id).or_insert(0);
            *total = total
                .checked_add(amount)
                .ok_or_else(|| AirdropError::invalid("allocation overflows u64"))?;
        }

        for (&reward_id, &requested) in &totals {
            let remaining = self.remaining_supply(reward_id)?;
            if requested > remaining {
                return Err(AirdropError::InsufficientSupply { reward_id, requested, remaining });
            }
        }

        for (reward_id, requested) in totals {
            self.allocated[reward_id as usize] += requested;
        }

        Ok(())
    }

    /// Look up a reward.
    pub fn get(&self, reward_id: RewardId) -> Option<&Reward> {
        usize::try_from(reward_id).ok().and_then(|i| self.rewards.get(i))
    }

    /// Number of registered rewards.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// True if no reward has been registered.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    fn index(&self, reward_id: RewardId) -> AirdropResult<usize> {
        usize::try_from(reward_id)
            .ok()
            .filter(|&i| i < self.rewards.len())
            .ok_or(AirdropError::NotFound(Missing::Reward(reward_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryTokenBackend;
    use crate::error::ErrorKind;

    const CUSTODIAN: Address = Address::new([0xCC; 20]);
    const CREATOR: Address = Address::new([1; 20]);
    const NFT: Address = Address::new([0xAA; 20]);

    fn uris(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ipfs://reward/{}", i)).collect()
    }

    fn backend_with_items(n: u64) -> InMemoryTokenBackend {
        let backend = InMemoryTokenBackend::new(CUSTODIAN);
        for id in 0..n {
            backend.mint_item(NFT, id, CREATOR);
        }
        backend
    }

    #[test]
    fn test_non_fungible_ids_and_custody() {
        let backend = backend_with_items(3);
        let mut registry = RewardRegistry::new();

        let ids = registry
            .create_non_fungible_rewards(&backend, CREATOR, NFT, &[0, 1, 2], &uris(3))
            .unwrap();

        assert_eq!(ids, vec![0, 1, 2]);
        for id in 0..3 {
            assert_eq!(backend.owner_of(NFT, id), Some(CUSTODIAN));
            assert_eq!(registry.remaining_supply(id).unwrap(), 1);
        }
        assert_eq!(
            registry.get(2).unwrap().kind,
            RewardKind::NonFungibleItem { token_contract: NFT, token_id: 2, uri: "ipfs://reward/2".into() }
        );
    }

    #[test]
    fn test_non_fungible_length_mismatch() {
        let backend = backend_with_items(2);
        let mut registry = RewardRegistry::new();

        let err = registry
            .create_non_fungible_rewards(&backend, CREATOR, NFT, &[0, 1], &uris(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(backend.owner_of(NFT, 0), Some(CREATOR));
    }

    #[test]
    fn test_custody_failure_rolls_back_batch() {
        let backend = backend_with_items(3);
        backend.block_item(NFT, 2);
        let mut registry = RewardRegistry::new();

        let err = registry
            .create_non_fungible_rewards(&backend, CREATOR, NFT, &[0, 1, 2], &uris(3))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CustodyError);
        assert!(registry.is_empty());
        for id in 0..3 {
            assert_eq!(backend.owner_of(NFT, id), Some(CREATOR));
        }
    }

    #[test]
    fn test_native_rewards() {
        let mut registry = RewardRegistry::new();
        let ids = registry
            .create_native_rewards(CREATOR, &["Participation".into(), "Bonus".into()], &[990, 10])
            .unwrap();

        assert_eq!(ids, vec![0, 1]);
        assert_eq!(registry.remaining_supply(0).unwrap(), 990);
        assert_eq!(registry.remaining_supply(1).unwrap(), 10);
    }

    #[test]
    fn test_native_rejects_zero_supply() {
        let mut registry = RewardRegistry::new();
        let err = registry
            .create_native_rewards(CREATOR, &["a".into(), "b".into()], &[5, 0])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_native_rejects_mismatch_and_empty() {
        let mut registry = RewardRegistry::new();
        assert!(registry.create_native_rewards(CREATOR, &["a".into()], &[1, 2]).is_err());
        assert!(registry.create_native_rewards(CREATOR, &[], &[]).is_err());
    }

    #[test]
    fn test_remaining_supply_unknown() {
        let registry = RewardRegistry::new();
        assert!(matches!(
            registry.remaining_supply(7),
            Err(AirdropError::NotFound(Missing::Reward(7)))
        ));
    }

    #[test]
    fn test_allocate_is_all_or_nothing() {
        let mut registry = RewardRegistry::new();
        registry.create_native_rewards(CREATOR, &["a".into(), "b".into()], &[10, 5]).unwrap();

        let err = registry.allocate(&[(0, 4), (1, 6)]).unwrap_err();
        assert!(matches!(
            err,
            AirdropError::InsufficientSupply { reward_id: 1, requested: 6, remaining: 5 }
        ));
        assert_eq!(registry.remaining_supply(0).unwrap(), 10);

        registry.allocate(&[(0, 4), (1, 5)]).unwrap();
        assert_eq!(registry.remaining_supply(0).unwrap(), 6);
        assert_eq!(registry.remaining_supply(1).unwrap(), 0);
    }

    #[test]
    fn test_allocate_sums_repeated_ids() {
        let mut registry = RewardRegistry::new();
        registry.create_native_rewards(CREATOR, &["a".into()], &[10]).unwrap();

        let err = registry.allocate(&[(0, 6), (0, 6)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientSupply);
        assert_eq!(registry.remaining_supply(0).unwrap(), 10);
    }

    #[test]
    fn test_allocate_unknown_reward() {
        let mut registry = RewardRegistry::new();
        registry.create_native_rewards(CREATOR, &["a".into()], &[10]).unwrap();

        let err = registry.allocate(&[(0, 1), (3, 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(registry.remaining_supply(0).unwrap(), 10);
    }
}
