//! Staking parameters fixed at ledger initialisation.

use serde::{Deserialize, Serialize};

/// Parameters of the reward-accrual formula.
///
/// `pending = staked × reward_rate × blocks_elapsed / reward_scale`
///
/// Settled rewards are kept as the numerator and only divided by
/// `reward_scale` when read or paid out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Reward micro-units per block per `reward_scale` staked micro-units.
    pub reward_rate: u128,

    /// Fixed-point denominator. Defaults to 1, so a rate of 100 pays 100
    /// reward units per block for every staked unit.
    pub reward_scale: u128,
}

impl StakingParams {
    pub const DEFAULT_REWARD_RATE: u128 = 100;
    pub const DEFAULT_REWARD_SCALE: u128 = 1;

    pub fn new(reward_rate: u128, reward_scale: u128) -> Self {
        Self {
            reward_rate,
            reward_scale,
        }
    }

    pub fn makefle_defaults() -> Self {
        Self::new(Self::DEFAULT_REWARD_RATE, Self::DEFAULT_REWARD_SCALE)
    }

    /// Whether a single staked unit earns at least one reward unit per block.
    ///
    /// Holds when the rate is zero (nothing accrues) or when
    /// `0 < reward_scale <= reward_rate`. Otherwise small stakes round down
    /// to zero growth between adjacent blocks.
    pub fn pays_every_block(&self) -> bool {
        self.reward_rate == 0 || (self.reward_scale != 0 && self.reward_scale <= self.reward_rate)
    }
}

impl Default for StakingParams {
    fn default() -> Self {
        Self::makefle_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pay_every_block() {
        let params = StakingParams::default();
        assert_eq!(params.reward_rate, 100);
        assert_eq!(params.reward_scale, 1);
        assert!(params.pays_every_block());
    }

    #[test]
    fn scale_above_rate_does_not_pay_every_block() {
        assert!(!StakingParams::new(100, 1_000_000).pays_every_block());
        assert!(!StakingParams::new(100, 0).pays_every_block());
        assert!(StakingParams::new(100, 100).pays_every_block());
        assert!(StakingParams::new(0, 1_000_000).pays_every_block());
    }
}
