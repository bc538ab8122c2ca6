#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use makefle_staking::StakingLedger;
use makefle_types::{AccountId, Amount, BlockHeight, StakingParams};

#[derive(Arbitrary, Debug)]
enum Op {
    Stake { who: u8, amount: u128 },
    Unstake { who: u8, amount: u128 },
    Claim { who: u8 },
    Pending { who: u8 },
    Mine { blocks: u32 },
    Rewind { blocks: u32 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    rate: u64,
    scale: u64,
    ops: Vec<Op>,
}

// Arbitrary operation sequences must never panic, and every committed state
// must conserve the staked supply.
fuzz_target!(|input: Input| {
    let params = StakingParams::new(input.rate as u128, input.scale as u128);
    let mut ledger = StakingLedger::new(params);
    let mut height = 0u64;
    let account = |n: u8| AccountId::new(format!("ST{:0>39}", n % 8));

    for op in input.ops {
        let h = BlockHeight::new(height);
        match op {
            Op::Stake { who, amount } => {
                let _ = ledger.stake(&account(who), Amount::new(amount), h);
            }
            Op::Unstake { who, amount } => {
                let _ = ledger.unstake(&account(who), Amount::new(amount), h);
            }
            Op::Claim { who } => {
                let _ = ledger.claim_rewards(&account(who), h);
            }
            Op::Pending { who } => {
                let _ = ledger.pending_rewards(&account(who), h);
            }
            Op::Mine { blocks } => height = height.saturating_add(blocks as u64),
            Op::Rewind { blocks } => height = height.saturating_sub(blocks as u64),
        }
        assert!(ledger.verify_conservation());
    }
});
