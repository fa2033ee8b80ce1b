//! Pack Airdrop Demo
//!
//! Runs a full registration → pack → commitment → claim cycle against the
//! in-memory token backend and logs every step.

use std::sync::Arc;
use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pack_airdrop::{
    core::hash::to_hex, Address, AirdropCenter, AirdropConfig, ErrorKind,
    InMemoryTokenBackend, SortedMerkleTree, VERSION,
};

const NUM_NFTS: u64 = 10;
const TOTAL_REWARDS: u64 = 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AirdropConfig::from_env().context("loading configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("parsing log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Pack Airdrop v{}", VERSION);
    info!("Hash algorithm: {:?}", config.hash_algorithm);

    demo_airdrop(&config).await
}

/// Demo function exercising the whole flow.
async fn demo_airdrop(config: &AirdropConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Airdrop ===");

    let custodian = Address::new([0xCC; 20]);
    let creator = Address::new([0x01; 20]);
    let nft_contract = Address::new([0xAA; 20]);
    let eligible = [
        Address::new([0x02; 20]),
        creator,
        Address::new([0x03; 20]),
    ];
    let outsider = Address::new([0x04; 20]);

    let backend = Arc::new(InMemoryTokenBackend::new(custodian));
    let center = AirdropCenter::new(config, backend.clone());

    // Mint items to the creator and register them as rewards
    let token_ids: Vec<u64> = (0..NUM_NFTS).collect();
    let uris: Vec<String> = token_ids.iter().map(|i| format!("Dummy reward URI {}", i)).collect();
    for &id in &token_ids {
        backend.mint_item(nft_contract, id, creator);
    }

    let mut reward_ids = center
        .create_non_fungible_rewards(creator, nft_contract, &token_ids, &uris)
        .await?;
    reward_ids.extend(
        center
            .create_native_rewards(creator, &["Participation reward".to_string()], &[TOTAL_REWARDS - NUM_NFTS])
            .await?,
    );

    let mut supplies = vec![1u64; NUM_NFTS as usize];
    supplies.push(TOTAL_REWARDS - NUM_NFTS);

    let pack_id = center
        .create_pack(creator, "Dummy pack URI", &reward_ids, &supplies)
        .await?;

    // Commit eligibility
    let tree = SortedMerkleTree::from_addresses(center.hash_algorithm(), &eligible);
    let root = tree.root().context("eligibility tree is empty")?;
    center.set_merkle_root(creator, pack_id, root).await?;
    info!("Root: {}", to_hex(&root));

    // Eligible claim
    let claimant = eligible[0];
    let proof = tree.proof_for_address(&claimant).context("claimant missing from tree")?;
    center.claim_airdrop(pack_id, claimant, &proof).await?;
    info!("{} pack balance: {}", claimant, backend.balance_of(claimant, pack_id));

    // Replay
    match center.claim_airdrop(pack_id, claimant, &proof).await {
        Err(e) if e.kind() == ErrorKind::AlreadyClaimed => info!("Replay rejected: {}", e),
        other => bail!("replayed claim was not rejected: {:?}", other),
    }

    // Ineligible claim
    match center.claim_airdrop(pack_id, outsider, &proof).await {
        Err(e) if e.kind() == ErrorKind::NotEligible => info!("Outsider rejected: {}", e),
        other => bail!("ineligible claim was not rejected: {:?}", other),
    }

    for event in center.events().await {
        info!("#{} {:?}", event.sequence, event.data);
    }

    if backend.balance_of(claimant, pack_id) != 1 {
        warn!("unexpected balance for {}", claimant);
    }
    info!("=== Demo Complete ===");
    Ok(())
}
