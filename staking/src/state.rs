//! Per-account stake record and reward accrual.
//!
//! Rewards are tracked as the undivided numerator `Σ staked × rate × blocks`.
//! Division by `reward_scale` happens only when a value is read or paid out,
//! so settling an account any number of times never loses a remainder.

use makefle_types::{Amount, BlockHeight, StakingParams};
use serde::{Deserialize, Serialize};

/// Stake state for a single account.
///
/// Created on first stake and never removed; a zero `staked` balance is a
/// valid resting state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    /// Principal currently deposited.
    pub staked: Amount,

    /// Height at which rewards were last settled or claimed.
    pub last_accrual_height: BlockHeight,

    /// Settled but unclaimed rewards, multiplied by `reward_scale`.
    #[serde(default)]
    pub accrued_scaled: u128,
}

impl StakeRecord {
    /// An empty record anchored at `height`.
    pub fn new(height: BlockHeight) -> Self {
        Self {
            staked: Amount::ZERO,
            last_accrual_height: height,
            accrued_scaled: 0,
        }
    }

    /// Scaled rewards earned since `last_accrual_height`. `None` on overflow.
    ///
    /// A `now` below `last_accrual_height` counts as zero elapsed blocks.
    pub fn accrued_since_scaled(&self, params: &StakingParams, now: BlockHeight) -> Option<u128> {
        let blocks = now.blocks_since(self.last_accrual_height) as u128;
        self.staked
            .micro()
            .checked_mul(params.reward_rate)?
            .checked_mul(blocks)
    }

    /// Settled plus newly earned rewards, still scaled.
    pub fn pending_scaled(&self, params: &StakingParams, now: BlockHeight) -> Option<u128> {
        self.accrued_scaled
            .checked_add(self.accrued_since_scaled(params, now)?)
    }

    /// Total claimable rewards at `now`. `None` on overflow or a zero scale.
    pub fn pending_rewards_checked(&self, params: &StakingParams, now: BlockHeight) -> Option<Amount> {
        self.pending_scaled(params, now)?
            .checked_div(params.reward_scale)
            .map(Amount::new)
    }

    /// A copy of this record with rewards settled up to `now`.
    ///
    /// Moves everything earned so far into `accrued_scaled` and rolls
    /// `last_accrual_height` forward. The principal is unchanged.
    pub fn settled(&self, params: &StakingParams, now: BlockHeight) -> Option<Self> {
        Some(Self {
            staked: self.staked,
            last_accrual_height: now.max(self.last_accrual_height),
            accrued_scaled: self.pending_scaled(params, now)?,
        })
    }

    /// Pay out every whole reward unit owed at `now`.
    ///
    /// Returns the amount paid and the record after the claim. The sub-unit
    /// remainder stays in `accrued_scaled` for the next claim.
    pub fn claimed(&self, params: &StakingParams, now: BlockHeight) -> Option<(Amount, Self)> {
        let total = self.pending_scaled(params, now)?;
        let owed = total.checked_div(params.reward_scale)?;
        let carry = total.checked_rem(params.reward_scale)?;
        let record = Self {
            staked: self.staked,
            last_accrual_height: now.max(self.last_accrual_height),
            accrued_scaled: carry,
        };
        Some((Amount::new(owed), record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> StakingParams {
        StakingParams::makefle_defaults()
    }

    /// One reward unit per block needs a whole `1_000_000` staked.
    fn coarse() -> StakingParams {
        StakingParams::new(100, 100_000_000)
    }

    fn record(staked: u128, at: u64) -> StakeRecord {
        StakeRecord {
            staked: Amount::new(staked),
            last_accrual_height: BlockHeight::new(at),
            accrued_scaled: 0,
        }
    }

    #[test]
    fn each_unit_earns_rate_per_block() {
        let r = record(1_000_000, 10);
        assert_eq!(
            r.pending_rewards_checked(&params(), BlockHeight::new(20)),
            Some(Amount::new(1_000_000_000))
        );
        assert_eq!(
            record(1, 0).pending_rewards_checked(&params(), BlockHeight::new(1)),
            Some(Amount::new(100))
        );
    }

    #[test]
    fn no_blocks_no_rewards() {
        let r = record(5_000_000, 10);
        assert_eq!(
            r.pending_rewards_checked(&params(), BlockHeight::new(10)),
            Some(Amount::ZERO)
        );
    }

    #[test]
    fn earlier_height_counts_as_zero_elapsed() {
        let mut r = record(1_000_000, 10);
        r.accrued_scaled = 7;
        assert_eq!(
            r.pending_rewards_checked(&params(), BlockHeight::new(3)),
            Some(Amount::new(7))
        );
    }

    #[test]
    fn coarse_scale_rounds_reads_down() {
        let r = record(9_999, 0);
        assert_eq!(
            r.pending_rewards_checked(&coarse(), BlockHeight::new(1)),
            Some(Amount::ZERO)
        );
        assert_eq!(
            r.pending_rewards_checked(&coarse(), BlockHeight::new(1_000)),
            Some(Amount::new(9))
        );
    }

    #[test]
    fn settle_preserves_pending_and_principal() {
        let r = record(2_000_000, 0);
        let now = BlockHeight::new(5);
        let before = r.pending_rewards_checked(&params(), now).unwrap();
        let s = r.settled(&params(), now).unwrap();
        assert_eq!(s.staked, r.staked);
        assert_eq!(s.last_accrual_height, now);
        assert_eq!(s.accrued_scaled, before.micro());
        assert_eq!(s.pending_rewards_checked(&params(), now), Some(before));
    }

    #[test]
    fn repeated_settlement_keeps_remainders() {
        let mut settled = record(5_000, 0);
        for h in 1..=200 {
            settled = settled.settled(&coarse(), BlockHeight::new(h)).unwrap();
        }
        let untouched = record(5_000, 0);
        let end = BlockHeight::new(200);
        assert_eq!(
            settled.pending_rewards_checked(&coarse(), end),
            untouched.pending_rewards_checked(&coarse(), end)
        );
        assert_eq!(
            settled.pending_rewards_checked(&coarse(), end),
            Some(Amount::new(1))
        );
    }

    #[test]
    fn claim_carries_sub_unit_remainder() {
        let r = record(600_000, 0);
        // 600_000 × 100 × 1 = 0.6 of a reward unit.
        let (paid, r) = r.claimed(&coarse(), BlockHeight::new(1)).unwrap();
        assert_eq!(paid, Amount::ZERO);
        assert_eq!(r.accrued_scaled, 60_000_000);
        // Another 0.6 brings the total to 1.2.
        let (paid, r) = r.claimed(&coarse(), BlockHeight::new(2)).unwrap();
        assert_eq!(paid, Amount::new(1));
        assert_eq!(r.accrued_scaled, 20_000_000);
        assert_eq!(r.last_accrual_height, BlockHeight::new(2));
        assert_eq!(
            r.pending_rewards_checked(&coarse(), BlockHeight::new(2)),
            Some(Amount::ZERO)
        );
    }

    #[test]
    fn overflow_is_reported() {
        let r = record(u128::MAX, 0);
        assert!(r.pending_rewards_checked(&params(), BlockHeight::new(2)).is_none());
        assert!(r.settled(&params(), BlockHeight::new(2)).is_none());
        assert!(r.claimed(&params(), BlockHeight::new(2)).is_none());
    }

    #[test]
    fn zero_scale_is_reported_not_panicking() {
        let r = record(1_000_000, 0);
        let broken = StakingParams::new(100, 0);
        assert!(r.pending_rewards_checked(&broken, BlockHeight::new(1)).is_none());
        assert!(r.claimed(&broken, BlockHeight::new(1)).is_none());
    }
}
