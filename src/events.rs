//! Ledger Events
//!
//! Append-only record of every successful mutation, in the order the
//! mutations became visible.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::core::address::Address;
use crate::core::hash::Hash32;
use crate::ledger::{PackId, RewardId};

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEventData {
    /// Rewards were registered
    RewardsCreated {
        creator: Address,
        reward_ids: Vec<RewardId>,
    },

    /// Pack was created
    PackCreated {
        pack_id: PackId,
        owner: Address,
        reward_ids: Vec<RewardId>,
        supplies: Vec<u64>,
    },

    /// Merkle root was set or replaced
    MerkleRootSet {
        pack_id: PackId,
        root: Hash32,
        previous: Option<Hash32>,
    },

    /// Airdrop was claimed
    AirdropClaimed {
        pack_id: PackId,
        claimant: Address,
    },
}

/// A ledger event with ordering and time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Position in the log, from zero.
    pub sequence: u64,
    /// Wall-clock time of recording.
    pub timestamp: DateTime<Utc>,
    /// Event data
    pub data: LedgerEventData,
}

/// Append-only event log.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn record(&mut self, data: LedgerEventData) -> u64 {
        let sequence = self.events.len() as u64;
        self.events.push(LedgerEvent {
            sequence,
            timestamp: Utc::now(),
            data,
        });
        sequence
    }

    /// All events in order.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
