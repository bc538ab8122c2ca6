//! Events emitted after each committed ledger mutation.
//!
//! The asset-transfer layer subscribes here to move the underlying funds in
//! lock-step with the ledger: transfer-in on `Staked`, transfer-out on
//! `Unstaked`, reward disbursement on `RewardsClaimed`.

use makefle_types::{AccountId, Amount, BlockHeight};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StakingEvent {
    /// Principal was deposited.
    Staked {
        account: AccountId,
        amount: Amount,
        height: BlockHeight,
    },
    /// Principal was withdrawn.
    Unstaked {
        account: AccountId,
        amount: Amount,
        height: BlockHeight,
    },
    /// Owed rewards were paid out.
    RewardsClaimed {
        account: AccountId,
        amount: Amount,
        height: BlockHeight,
    },
}

impl StakingEvent {
    pub fn account(&self) -> &AccountId {
        match self {
            Self::Staked { account, .. }
            | Self::Unstaked { account, .. }
            | Self::RewardsClaimed { account, .. } => account,
        }
    }
}

/// Synchronous fan-out event bus for staking events.
///
/// Listeners run inline on the emitting call.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&StakingEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StakingEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &StakingEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn staked(n: u128) -> StakingEvent {
        StakingEvent::Staked {
            account: AccountId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            amount: Amount::new(n),
            height: BlockHeight::new(1),
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&staked(5));
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&staked(1));
    }

    #[test]
    fn event_exposes_account() {
        let event = staked(1);
        assert_eq!(
            event.account().as_str(),
            "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
        );
    }
}
