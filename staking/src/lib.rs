//! makefle staking ledger.
//!
//! Accounts stake a fungible balance into a pooled contract and accrue
//! rewards linearly in block height:
//! `pending = (accrued_scaled + staked × rate × (h_now − h_last)) / scale`
//!
//! This crate handles:
//! - Stake / unstake with settlement of pending rewards first
//! - Reward claims
//! - Read-only views over balances, totals and pending rewards
//! - The named contract-call surface used by a transaction layer
//! - Persistence through an abstract [`makefle_store::StakeStore`]

pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod event;
pub mod state;

pub use config::{ConfigError, LedgerConfig};
pub use contract::{CallError, CallResult, Contract, PublicCall, ReadOnlyCall, Value};
pub use engine::StakingLedger;
pub use error::StakingError;
pub use event::{EventBus, StakingEvent};
pub use state::StakeRecord;
