//! Shared utilities for the makefle staking ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat};
