//! Nullable block clock: deterministic heights for testing.

use makefle_types::{BlockClock, BlockHeight};
use std::cell::Cell;

/// A deterministic block clock.
///
/// Height only advances when you tell it to.
pub struct NullBlockClock {
    current: Cell<u64>,
}

impl NullBlockClock {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    /// Get the current height.
    pub fn now(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Advance the chain by `blocks` empty blocks (saturating at `u64::MAX`).
    pub fn mine_empty_blocks(&self, blocks: u64) {
        self.current.set(self.current.get().saturating_add(blocks));
    }

    /// Advance the chain by a single block.
    pub fn mine_block(&self) {
        self.mine_empty_blocks(1);
    }

    /// Set the height to a specific value.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Default for NullBlockClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlockClock for NullBlockClock {
    fn current_height(&self) -> BlockHeight {
        self.now()
    }
}
