//! Sorted Merkle Tree
//!
//! Tree builder for eligibility commitments. Leaves are sorted before
//! building and every pair is hashed smaller-first, so proofs are plain lists
//! of sibling hashes. An unpaired trailing node is promoted to the next level
//! unchanged.

use crate::core::address::Address;
use crate::core::hash::{to_hex, Hash32, HashAlgorithm};

/// Binary Merkle tree over sorted leaves.
#[derive(Clone, Debug)]
pub struct SortedMerkleTree {
    algorithm: HashAlgorithm,
    /// All tree levels (sorted leaves at index 0, root at last index)
    levels: Vec<Vec<Hash32>>,
}

impl SortedMerkleTree {
    /// Build from pre-hashed leaves.
    pub fn new(algorithm: HashAlgorithm, mut leaves: Vec<Hash32>) -> Self {
        leaves.sort_unstable();

        let mut levels = Vec::new();
        if !leaves.is_empty() {
            levels.push(leaves);
        }

        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Hash32> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => algorithm.hash_sorted_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            levels.push(next);
        }

        Self { algorithm, levels }
    }

    /// Build from eligible addresses.
    pub fn from_addresses(algorithm: HashAlgorithm, addresses: &[Address]) -> Self {
        Self::new(algorithm, addresses.iter().map(|a| a.leaf(algorithm)).collect())
    }

    /// Hash algorithm the tree was built with.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Root hash, or None for an empty tree.
    pub fn root(&self) -> Option<Hash32> {
        self.levels.last()?.first().copied()
    }

    /// Root as `0x`-prefixed hex.
    pub fn hex_root(&self) -> Option<String> {
        self.root().map(|r| to_hex(&r))
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Inclusion proof for a leaf hash, or None if the leaf is absent.
    pub fn proof(&self, leaf: &Hash32) -> Option<Vec<Hash32>> {
        let mut index = self.levels.first()?.binary_search(leaf).ok()?;
        let mut siblings = Vec::with_capacity(self.depth());

        for level in &self.levels[..self.depth()] {
            let sibling = index ^ 1;
            if sibling < level.len() {
                siblings.push(level[sibling]);
            }
            index /= 2;
        }

        Some(siblings)
    }

    /// Inclusion proof for an address.
    pub fn proof_for_address(&self, address: &Address) -> Option<Vec<Hash32>> {
        self.proof(&address.leaf(self.algorithm))
    }
}
