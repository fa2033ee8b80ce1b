//! Reward pool and pack ledger.
//!
//! ```text
//! reward.rs - Reward definitions and supply accounting
//! pack.rs   - Packs and their per-reward allocations
//! ```

pub mod pack;
pub mod reward;

pub use pack::{Pack, PackId, PackLedger};
pub use reward::{Reward, RewardId, RewardKind, RewardRegistry};
