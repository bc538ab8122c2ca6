use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use makefle_staking::{Contract, StakeRecord, StakingLedger, Value};
use makefle_types::{AccountId, Amount, BlockHeight, StakingParams};

fn account(n: usize) -> AccountId {
    AccountId::new(format!("ST{:0>39}", n))
}

fn populated_ledger(accounts: usize) -> StakingLedger {
    let mut ledger = StakingLedger::default();
    for i in 0..accounts {
        ledger
            .stake(&account(i), Amount::new(1_000_000 + i as u128), BlockHeight::new(0))
            .unwrap();
    }
    ledger
}

fn bench_pending_rewards(c: &mut Criterion) {
    let params = StakingParams::default();
    let record = StakeRecord {
        staked: Amount::new(123_456_789),
        last_accrual_height: BlockHeight::new(0),
        accrued_scaled: 42,
    };

    c.bench_function("record_pending_rewards", |b| {
        b.iter(|| {
            black_box(record.pending_rewards_checked(black_box(&params), black_box(BlockHeight::new(10_000))))
        });
    });
}

fn bench_stake_unstake(c: &mut Criterion) {
    let mut group = c.benchmark_group("stake_unstake");

    for accounts in [1, 100, 10_000] {
        group.bench_with_input(BenchmarkId::new("cycle", accounts), &accounts, |b, &n| {
            b.iter_batched(
                || populated_ledger(n),
                |mut ledger| {
                    let who = account(n / 2);
                    ledger.stake(&who, Amount::new(500), BlockHeight::new(10)).unwrap();
                    ledger.unstake(&who, Amount::new(500), BlockHeight::new(11)).unwrap();
                    black_box(ledger.total_staked())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_contract_dispatch(c: &mut Criterion) {
    let contract = Contract::new(populated_ledger(100));
    let args = [Value::Principal(account(50))];

    c.bench_function("contract_get_pending_rewards", |b| {
        b.iter(|| {
            black_box(contract.call_read_only(
                black_box("get-pending-rewards"),
                black_box(&args),
                BlockHeight::new(1_000),
            ))
        });
    });
}

fn bench_conservation_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_conservation");

    for accounts in [10, 1_000, 10_000] {
        let ledger = populated_ledger(accounts);
        group.bench_with_input(BenchmarkId::from_parameter(accounts), &accounts, |b, _| {
            b.iter(|| black_box(ledger.verify_conservation()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_pending_rewards,
    bench_stake_unstake,
    bench_contract_dispatch,
    bench_conservation_check,
);
criterion_main!(benches);
