//! Block height, the ledger's logical clock.
//!
//! Heights are supplied by the host chain. The ledger never advances them
//! itself; it only reads the height passed to each operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height on the host chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed from `earlier` to this height (0 if `earlier` is later).
    pub fn blocks_since(&self, earlier: BlockHeight) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of the current block height.
///
/// Implemented by whatever drives the ledger: the host chain adapter in
/// production, a controllable clock in tests.
pub trait BlockClock {
    fn current_height(&self) -> BlockHeight;
}
