//! Abstract storage traits for the makefle staking ledger.
//!
//! A storage backend implements [`StakeStore`]; the ledger depends only on
//! the trait. Records are opaque bytes so this crate does not depend on the
//! ledger's own types.

pub mod error;
pub mod stake;

pub use error::StoreError;
pub use stake::StakeStore;
