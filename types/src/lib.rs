//! Fundamental types for the makefle staking ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, amounts, block heights, and staking parameters.

pub mod account;
pub mod amount;
pub mod error;
pub mod height;
pub mod params;

pub use account::AccountId;
pub use amount::Amount;
pub use error::MakefleError;
pub use height::{BlockClock, BlockHeight};
pub use params::StakingParams;
