//! Token Backend
//!
//! The external collaborator that actually holds non-fungible items and mints
//! pack units. The ledger only calls it; it never reaches into its state.
//!
//! `InMemoryTokenBackend` is a complete in-process implementation used by the
//! demo binary and tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use thiserror::Error;

use crate::core::address::Address;
use crate::ledger::PackId;

/// Custody transfer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// `from` does not own the item.
    #[error("{from} does not own token {token_id} of {contract}")]
    NotOwner {
        /// Claimed owner.
        from: Address,
        /// Token contract.
        contract: Address,
        /// Token id.
        token_id: u64,
    },
    /// Backend refused the transfer.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Minting failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    /// Backend refused to mint.
    #[error("mint rejected: {0}")]
    Rejected(String),
}

/// Custody and minting capability.
///
/// Calls complete or fail synchronously. Any failure aborts the enclosing
/// ledger operation.
pub trait TokenBackend: Send + Sync {
    /// Move `contract`/`token_id` from `from` into ledger custody.
    fn hold_item(&self, from: Address, contract: Address, token_id: u64) -> Result<(), CustodyError>;

    /// Return a held item to `to`. Only used to undo `hold_item` within the
    /// same failed batch.
    fn release_item(&self, to: Address, contract: Address, token_id: u64) -> Result<(), CustodyError>;

    /// Issue one unit of `pack_id` to `to`.
    fn mint_pack_unit(&self, to: Address, pack_id: PackId) -> Result<(), MintError>;
}

#[derive(Default)]
struct BackendState {
    /// (contract, token_id) -> current owner
    items: BTreeMap<(Address, u64), Address>,
    /// (holder, pack_id) -> pack units
    pack_balances: BTreeMap<(Address, PackId), u64>,
    /// Items whose custody transfer must fail
    blocked_items: BTreeSet<(Address, u64)>,
    /// Reject every mint while set
    mint_paused: bool,
}

/// In-memory item ownership and pack balances.
pub struct InMemoryTokenBackend {
    custodian: Address,
    state: Mutex<BackendState>,
}

impl InMemoryTokenBackend {
    /// Create a backend whose custody account is `custodian`.
    pub fn new(custodian: Address) -> Self {
        Self {
            custodian,
            state: Mutex::new(BackendState::default()),
        }
    }

    /// Address that holds items in custody.
    pub fn custodian(&self) -> Address {
        self.custodian
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mint a non-fungible item to `owner`.
    pub fn mint_item(&self, contract: Address, token_id: u64, owner: Address) {
        self.state().items.insert((contract, token_id), owner);
    }

    /// Current owner of an item.
    pub fn owner_of(&self, contract: Address, token_id: u64) -> Option<Address> {
        self.state().items.get(&(contract, token_id)).copied()
    }

    /// Pack units held by `holder`.
    pub fn balance_of(&self, holder: Address, pack_id: PackId) -> u64 {
        self.state().pack_balances.get(&(holder, pack_id)).copied().unwrap_or(0)
    }

    /// Make custody transfers of one item fail.
    pub fn block_item(&self, contract: Address, token_id: u64) {
        self.state().blocked_items.insert((contract, token_id));
    }

    /// Pause or resume minting.
    pub fn set_mint_paused(&self, paused: bool) {
        self.state().mint_paused = paused;
    }
}

impl TokenBackend for InMemoryTokenBackend {
    fn hold_item(&self, from: Address, contract: Address, token_id: u64) -> Result<(), CustodyError> {
        let mut state = self.state();
        let key = (contract, token_id);
        if state.blocked_items.contains(&key) {
            return Err(CustodyError::Rejected(format!("token {} is not transferable", token_id)));
        }
        match state.items.get(&key) {
            Some(owner) if *owner == from => {
                state.items.insert(key, self.custodian);
                Ok(())
            }
            _ => Err(CustodyError::NotOwner { from, contract, token_id }),
        }
    }

    fn release_item(&self, to: Address, contract: Address, token_id: u64) -> Result<(), CustodyError> {
        let mut state = self.state();
        let key = (contract, token_id);
        match state.items.get(&key) {
            Some(owner) if *owner == self.custodian => {
                state.items.insert(key, to);
                Ok(())
            }
            _ => Err(CustodyError::NotOwner { from: self.custodian, contract, token_id }),
        }
    }

    fn mint_pack_unit(&self, to: Address, pack_id: PackId) -> Result<(), MintError> {
        let mut state = self.state();
        if state.mint_paused {
            return Err(MintError::Rejected("minting paused".into()));
        }
        *state.pack_balances.entry((to, pack_id)).or_insert(0) += 1;
        Ok(())
    }
}
