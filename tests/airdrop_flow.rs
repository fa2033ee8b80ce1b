//! End-to-end pack airdrop flow.

use std::sync::Arc;

use pack_airdrop::{
    Address, AirdropCenter, AirdropConfig, ErrorKind, InMemoryTokenBackend, RewardKind,
    SortedMerkleTree,
};

const NUM_NFTS: u64 = 10;
const TOTAL_REWARDS: u64 = 1000;

#[tokio::test]
async fn test_entire_pack_flow() {
    let custodian = Address::new([0xCC; 20]);
    let creator = Address::new([0x01; 20]);
    let good_claimer = Address::new([0x02; 20]);
    let deployer = Address::new([0x03; 20]);
    let bad_claimer = Address::new([0x04; 20]);
    let nft_contract = Address::new([0xAA; 20]);

    let backend = Arc::new(InMemoryTokenBackend::new(custodian));
    let center = AirdropCenter::new(&AirdropConfig::default(), backend.clone());

    // Ten single-supply item rewards
    let token_ids: Vec<u64> = (0..NUM_NFTS).collect();
    let uris: Vec<String> = token_ids.iter().map(|i| format!("Dummy reward URI {}", i)).collect();
    for &id in &token_ids {
        backend.mint_item(nft_contract, id, creator);
    }
    let mut reward_ids = center
        .create_non_fungible_rewards(creator, nft_contract, &token_ids, &uris)
        .await
        .unwrap();
    assert_eq!(reward_ids, (0..NUM_NFTS).collect::<Vec<_>>());
    for &id in &token_ids {
        assert_eq!(backend.owner_of(nft_contract, id), Some(custodian));
    }

    // One participation reward
    let native = center
        .create_native_rewards(creator, &["Participation reward".to_string()], &[TOTAL_REWARDS - NUM_NFTS])
        .await
        .unwrap();
    assert_eq!(native, vec![10]);
    reward_ids.extend(native);
    assert!(matches!(
        center.reward(10).await.unwrap().kind,
        RewardKind::NativeAllocation { .. }
    ));

    // Pack with everything
    let mut supplies = vec![1u64; NUM_NFTS as usize];
    supplies.push(TOTAL_REWARDS - NUM_NFTS);
    let pack_id = center
        .create_pack(creator, "Dummy pack URI", &reward_ids, &supplies)
        .await
        .unwrap();
    assert_eq!(pack_id, 0);
    assert_eq!(center.pack(pack_id).await.unwrap().total_units(), TOTAL_REWARDS);
    for &id in &reward_ids {
        assert_eq!(center.remaining_supply(id).await.unwrap(), 0);
    }

    // Nothing left for a second pack
    let err = center.create_pack(creator, "Second", &[10], &[1]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientSupply);

    // Eligibility over three addresses
    let tree = SortedMerkleTree::from_addresses(center.hash_algorithm(), &[good_claimer, creator, deployer]);
    center.set_merkle_root(creator, pack_id, tree.root().unwrap()).await.unwrap();

    // Good claimer claims once
    assert_eq!(backend.balance_of(good_claimer, pack_id), 0);
    let proof = tree.proof_for_address(&good_claimer).unwrap();
    center.claim_airdrop(pack_id, good_claimer, &proof).await.unwrap();
    assert_eq!(backend.balance_of(good_claimer, pack_id), 1);
    assert!(center.has_claimed(pack_id, &good_claimer).await);

    let err = center.claim_airdrop(pack_id, good_claimer, &proof).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyClaimed);
    assert_eq!(backend.balance_of(good_claimer, pack_id), 1);

    // Bad claimer has no valid proof
    assert!(tree.proof_for_address(&bad_claimer).is_none());
    let err = center.claim_airdrop(pack_id, bad_claimer, &proof).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotEligible);
    assert_eq!(backend.balance_of(bad_claimer, pack_id), 0);

    assert_eq!(center.events().await.len(), 5);
}
