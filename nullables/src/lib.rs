//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's external dependencies (the host block clock and the
//! key-value store) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests and replays.

pub mod clock;
pub mod store;

pub use clock::NullBlockClock;
pub use store::NullStakeStore;
