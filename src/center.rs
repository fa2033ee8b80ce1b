//! Airdrop Center
//!
//! Shared entry point that owns the registry, pack ledger, commitments and
//! event log, and serializes access to them.
//!
//! Locks are always taken in the order rewards → packs → commitments → events.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn, instrument};

use crate::backend::TokenBackend;
use crate::config::AirdropConfig;
use crate::core::address::Address;
use crate::core::hash::{to_hex, Hash32, HashAlgorithm};
use crate::error::{AirdropError, AirdropResult};
use crate::events::{EventLog, LedgerEvent, LedgerEventData};
use crate::ledger::{Pack, PackId, PackLedger, Reward, RewardId, RewardRegistry};
use crate::proof::{ClaimReceipt, ClaimVerifier, CommitmentStore};

/// Reward pool, pack ledger and airdrop claims behind one API.
pub struct AirdropCenter<B: TokenBackend> {
    backend: Arc<B>,
    verifier: ClaimVerifier,
    rewards: RwLock<RewardRegistry>,
    packs: RwLock<PackLedger>,
    commitments: RwLock<CommitmentStore>,
    events: RwLock<EventLog>,
}

impl<B: TokenBackend> AirdropCenter<B> {
    /// Create a center using `backend` for custody and minting.
    pub fn new(config: &AirdropConfig, backend: Arc<B>) -> Self {
        Self {
            backend,
            verifier: ClaimVerifier::new(config.hash_algorithm, config.max_proof_depth),
            rewards: RwLock::new(RewardRegistry::new()),
            packs: RwLock::new(PackLedger::new()),
            commitments: RwLock::new(CommitmentStore::new()),
            events: RwLock::new(EventLog::new()),
        }
    }

    /// Token backend.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Hash algorithm for leaves and nodes.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.verifier.algorithm()
    }

    // =========================================================================
    // REWARDS
    // =========================================================================

    /// Register non-fungible rewards, taking each item into custody.
    #[instrument(skip(self, token_ids, uris), fields(count = token_ids.len()))]
    pub async fn create_non_fungible_rewards(
        &self,
        creator: Address,
        token_contract: Address,
        token_ids: &[u64],
        uris: &[String],
    ) -> AirdropResult<Vec<RewardId>> {
        let mut rewards = self.rewards.write().await;
        let ids = rewards.create_non_fungible_rewards(
            self.backend.as_ref(),
            creator,
            token_contract,
            token_ids,
            uris,
        )?;

        info!("{} registered {} non-fungible rewards from {}", creator, ids.len(), token_contract);
        self.events.write().await.record(LedgerEventData::RewardsCreated {
            creator,
            reward_ids: ids.clone(),
        });
        Ok(ids)
    }

    /// Register native rewards with the given supplies.
    #[instrument(skip(self, labels, supplies), fields(count = labels.len()))]
    pub async fn create_native_rewards(
        &self,
        creator: Address,
        labels: &[String],
        supplies: &[u64],
    ) -> AirdropResult<Vec<RewardId>> {
        let mut rewards = self.rewards.write().await;
        let ids = rewards.create_native_rewards(creator, labels, supplies)?;

        info!("{} registered {} native rewards", creator, ids.len());
        self.events.write().await.record(LedgerEventData::RewardsCreated {
            creator,
            reward_ids: ids.clone(),
        });
        Ok(ids)
    }

    /// Unallocated supply of a reward.
    pub async fn remaining_supply(&self, reward_id: RewardId) -> AirdropResult<u64> {
        self.rewards.read().await.remaining_supply(reward_id)
    }

    /// Look up a reward.
    pub async fn reward(&self, reward_id: RewardId) -> Option<Reward> {
        self.rewards.read().await.get(reward_id).cloned()
    }

    /// Number of registered rewards.
    pub async fn reward_count(&self) -> usize {
        self.rewards.read().await.len()
    }

    // =========================================================================
    // PACKS
    // =========================================================================

    /// Create a pack owned by `owner`, allocating supply from the registry.
    #[instrument(skip(self, uri, reward_ids, supplies), fields(rewards = reward_ids.len()))]
    pub async fn create_pack(
        &self,
        owner: Address,
        uri: &str,
        reward_ids: &[RewardId],
        supplies: &[u64],
    ) -> AirdropResult<PackId> {
        let mut rewards = self.rewards.write().await;
        let mut packs = self.packs.write().await;
        let pack_id = packs.create_pack(&mut rewards, owner, uri, reward_ids, supplies)?;

        info!("{} created pack {} with {} rewards", owner, pack_id, reward_ids.len());
        self.events.write().await.record(LedgerEventData::PackCreated {
            pack_id,
            owner,
            reward_ids: reward_ids.to_vec(),
            supplies: supplies.to_vec(),
        });
        Ok(pack_id)
    }

    /// Owner of a pack.
    pub async fn pack_owner(&self, pack_id: PackId) -> AirdropResult<Address> {
        self.packs.read().await.owner(pack_id)
    }

    /// Look up a pack.
    pub async fn pack(&self, pack_id: PackId) -> Option<Pack> {
        self.packs.read().await.get(pack_id).cloned()
    }

    /// Number of packs.
    pub async fn pack_count(&self) -> usize {
        self.packs.read().await.len()
    }

    // =========================================================================
    // COMMITMENTS AND CLAIMS
    // =========================================================================

    /// Set or replace the eligibility root of a pack. Owner only.
    #[instrument(skip(self, root))]
    pub async fn set_merkle_root(&self, caller: Address, pack_id: PackId, root: Hash32) -> AirdropResult<()> {
        let packs = self.packs.read().await;
        let mut commitments = self.commitments.write().await;

        let previous = match commitments.set_merkle_root(&packs, caller, pack_id, root) {
            Ok(previous) => previous,
            Err(e @ AirdropError::Unauthorized { .. }) => {
                warn!("{} tried to set root of pack {} without owning it", caller, pack_id);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        info!("pack {} root set to {}", pack_id, to_hex(&root));
        self.events.write().await.record(LedgerEventData::MerkleRootSet {
            pack_id,
            root,
            previous,
        });
        Ok(())
    }

    /// Current root of a pack.
    pub async fn merkle_root(&self, pack_id: PackId) -> Option<Hash32> {
        self.commitments.read().await.root(pack_id)
    }

    /// Whether `address` has claimed for `pack_id`.
    pub async fn has_claimed(&self, pack_id: PackId, address: &Address) -> bool {
        self.commitments.read().await.has_claimed(pack_id, address)
    }

    /// Number of successful claims for a pack.
    pub async fn claim_count(&self, pack_id: PackId) -> usize {
        self.commitments.read().await.claim_count(pack_id)
    }

    /// Claim one pack unit with an inclusion proof.
    ///
    /// The commitment write lock is held from the replay check until the
    /// claim is recorded, so concurrent claims for the same address resolve
    /// to exactly one success.
    #[instrument(skip(self, proof), fields(proof_len = proof.len()))]
    pub async fn claim_airdrop(
        &self,
        pack_id: PackId,
        claimant: Address,
        proof: &[Hash32],
    ) -> AirdropResult<ClaimReceipt> {
        let mut commitments = self.commitments.write().await;
        let receipt = self.verifier.claim_airdrop(
            &mut commitments,
            self.backend.as_ref(),
            pack_id,
            claimant,
            proof,
        )?;

        info!("{} claimed one unit of pack {}", claimant, pack_id);
        self.events.write().await.record(LedgerEventData::AirdropClaimed { pack_id, claimant });
        Ok(receipt)
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Snapshot of the event log.
    pub async fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().await.events().to_vec()
    }
}
