//! Ledger and claim errors.

use std::fmt;
use thiserror::Error;

use crate::backend::{CustodyError, MintError};
use crate::core::address::Address;
use crate::ledger::{PackId, RewardId};

/// What a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Unknown reward id.
    Reward(RewardId),
    /// Unknown pack id.
    Pack(PackId),
    /// Pack has no committed Merkle root.
    Commitment(PackId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reward(id) => write!(f, "reward {}", id),
            Self::Pack(id) => write!(f, "pack {}", id),
            Self::Commitment(id) => write!(f, "merkle root for pack {}", id),
        }
    }
}

/// Flat error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or mismatched arguments.
    InvalidInput,
    /// Unknown reward, pack or commitment.
    NotFound,
    /// Allocation would exceed remaining supply.
    InsufficientSupply,
    /// Caller is not the pack owner.
    Unauthorized,
    /// Address already claimed for this pack.
    AlreadyClaimed,
    /// Proof does not verify against the root.
    NotEligible,
    /// Custody transfer rejected.
    CustodyError,
    /// Pack unit mint rejected.
    MintError,
}

/// Errors returned by every ledger and claim operation.
///
/// A returned error always means no state was changed.
#[derive(Debug, Error)]
pub enum AirdropError {
    /// Malformed or mismatched arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown id.
    #[error("{0} not found")]
    NotFound(Missing),

    /// Allocation exceeds what is left of the reward.
    #[error("insufficient supply for reward {reward_id}: requested {requested}, remaining {remaining}")]
    InsufficientSupply {
        /// Reward being allocated.
        reward_id: RewardId,
        /// Total units requested by the call.
        requested: u64,
        /// Units still unallocated.
        remaining: u64,
    },

    /// Owner-gated action attempted by someone else.
    #[error("{caller} is not the owner of pack {pack_id}")]
    Unauthorized {
        /// Address that made the call.
        caller: Address,
        /// Pack the action targeted.
        pack_id: PackId,
    },

    /// Replay of a successful claim.
    #[error("address {claimant} has already claimed airdrop for pack {pack_id}")]
    AlreadyClaimed {
        /// Pack claimed.
        pack_id: PackId,
        /// Claimant address.
        claimant: Address,
    },

    /// Proof failed verification.
    #[error("address {claimant} not eligible for airdrop of pack {pack_id}")]
    NotEligible {
        /// Pack claimed.
        pack_id: PackId,
        /// Claimant address.
        claimant: Address,
    },

    /// Custody collaborator failure.
    #[error("custody error: {0}")]
    Custody(#[from] CustodyError),

    /// Minting collaborator failure.
    #[error("mint error: {0}")]
    Mint(#[from] MintError),
}

impl AirdropError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InsufficientSupply { .. } => ErrorKind::InsufficientSupply,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::AlreadyClaimed { .. } => ErrorKind::AlreadyClaimed,
            Self::NotEligible { .. } => ErrorKind::NotEligible,
            Self::Custody(_) => ErrorKind::CustodyError,
            Self::Mint(_) => ErrorKind::MintError,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result alias for ledger operations.
pub type AirdropResult<T> = Result<T, AirdropError>;
