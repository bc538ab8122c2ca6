//! Core staking ledger.

use crate::error::StakingError;
use crate::event::{EventBus, StakingEvent};
use crate::state::StakeRecord;
use makefle_store::{StakeStore, StoreError};
use makefle_types::{AccountId, Amount, BlockHeight, StakingParams};
use std::collections::HashMap;
use tracing::{debug, warn};

const META_TOTAL_STAKED: &[u8] = b"total_staked";
const META_TOTAL_CLAIMED: &[u8] = b"total_rewards_claimed";
const META_LAST_HEIGHT: &[u8] = b"last_height";
const META_PARAMS: &[u8] = b"params";

/// The staking ledger: balances, the staked-supply total and reward accrual.
///
/// Every mutating operation takes the current block height, validates against
/// a copy of the affected record, and only commits once all checks pass. A
/// rejected call leaves the ledger untouched and emits no event.
pub struct StakingLedger {
    params: StakingParams,
    records: HashMap<AccountId, StakeRecord>,
    /// Always equal to the sum of `records[*].staked`.
    total_staked: Amount,
    total_rewards_claimed: Amount,
    /// Highest height any committed mutation has observed.
    last_height: BlockHeight,
    events: EventBus,
}

impl StakingLedger {
    pub fn new(params: StakingParams) -> Self {
        Self::with_genesis(params, BlockHeight::GENESIS)
    }

    /// Create an empty ledger whose clock starts at `genesis`.
    pub fn with_genesis(params: StakingParams, genesis: BlockHeight) -> Self {
        Self {
            params,
            records: HashMap::new(),
            total_staked: Amount::ZERO,
            total_rewards_claimed: Amount::ZERO,
            last_height: genesis,
            events: EventBus::new(),
        }
    }

    /// Register a listener for committed mutations.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StakingEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Deposit `amount` for `caller`.
    ///
    /// Pending rewards are settled up to `height` before the principal grows.
    /// A zero amount only settles an existing record and emits no event.
    pub fn stake(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        height: BlockHeight,
    ) -> Result<(), StakingError> {
        self.check_height(height)?;
        if amount.is_zero() {
            return self.settle_only(caller, height);
        }

        let current = self
            .records
            .get(caller)
            .cloned()
            .unwrap_or_else(|| StakeRecord::new(height));
        let mut record = self.settle(caller, &current, height)?;
        record.staked = record
            .staked
            .checked_add(amount)
            .ok_or_else(|| self.overflow(caller, "stake"))?;
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or_else(|| self.overflow(caller, "stake"))?;

        debug!(
            account = %caller,
            amount = amount.micro(),
            staked = record.staked.micro(),
            total = total.micro(),
            height = height.as_u64(),
            "stake committed"
        );
        self.records.insert(caller.clone(), record);
        self.total_staked = total;
        self.last_height = height;
        self.events.emit(&StakingEvent::Staked {
            account: caller.clone(),
            amount,
            height,
        });
        Ok(())
    }

    /// Withdraw `amount` of principal for `caller`.
    ///
    /// Fails with [`StakingError::InsufficientBalance`] if `amount` exceeds the
    /// staked balance. A zero amount only settles an existing record.
    pub fn unstake(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        height: BlockHeight,
    ) -> Result<(), StakingError> {
        self.check_height(height)?;
        if amount.is_zero() {
            return self.settle_only(caller, height);
        }

        let Some(current) = self.records.get(caller) else {
            warn!(account = %caller, requested = amount.micro(), "unstake from account with no stake");
            return Err(StakingError::InsufficientBalance {
                requested: amount.micro(),
                available: 0,
            });
        };
        let mut record = self.settle(caller, current, height)?;
        record.staked = match record.staked.checked_sub(amount) {
            Some(remaining) => remaining,
            None => {
                warn!(
                    account = %caller,
                    requested = amount.micro(),
                    staked = record.staked.micro(),
                    "unstake exceeds staked balance"
                );
                return Err(StakingError::InsufficientBalance {
                    requested: amount.micro(),
                    available: record.staked.micro(),
                });
            }
        };
        let total = self
            .total_staked
            .checked_sub(amount)
            .ok_or_else(|| self.overflow(caller, "unstake"))?;

        debug!(
            account = %caller,
            amount = amount.micro(),
            staked = record.staked.micro(),
            total = total.micro(),
            height = height.as_u64(),
            "unstake committed"
        );
        self.records.insert(caller.clone(), record);
        self.total_staked = total;
        self.last_height = height;
        self.events.emit(&StakingEvent::Unstaked {
            account: caller.clone(),
            amount,
            height,
        });
        Ok(())
    }

    /// Claim all rewards owed to `caller` at `height`, returning the amount.
    ///
    /// Pays every whole reward unit, keeps the sub-unit remainder and restarts
    /// accrual from `height`. An account that never staked claims zero and no
    /// record is created.
    pub fn claim_rewards(
        &mut self,
        caller: &AccountId,
        height: BlockHeight,
    ) -> Result<Amount, StakingError> {
        self.check_height(height)?;
        let Some(current) = self.records.get(caller) else {
            return Ok(Amount::ZERO);
        };

        let (owed, record) = current
            .claimed(&self.params, height)
            .ok_or_else(|| self.overflow(caller, "claim-rewards"))?;
        let claimed_total = self
            .total_rewards_claimed
            .checked_add(owed)
            .ok_or_else(|| self.overflow(caller, "claim-rewards"))?;

        debug!(
            account = %caller,
            claimed = owed.micro(),
            height = height.as_u64(),
            "rewards claimed"
        );
        self.records.insert(caller.clone(), record);
        self.total_rewards_claimed = claimed_total;
        self.last_height = height;
        self.events.emit(&StakingEvent::RewardsClaimed {
            account: caller.clone(),
            amount: owed,
            height,
        });
        Ok(owed)
    }

    // ── Views ───────────────────────────────────────────────────────────

    /// Principal staked by `account` (zero if it never staked).
    pub fn staked_balance(&self, account: &AccountId) -> Amount {
        self.records
            .get(account)
            .map(|r| r.staked)
            .unwrap_or(Amount::ZERO)
    }

    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    pub fn reward_rate(&self) -> u128 {
        self.params.reward_rate
    }

    /// Rewards `account` could claim at `height`. Pure; never settles.
    pub fn pending_rewards(
        &self,
        account: &AccountId,
        height: BlockHeight,
    ) -> Result<Amount, StakingError> {
        match self.records.get(account) {
            Some(record) => record
                .pending_rewards_checked(&self.params, height)
                .ok_or(StakingError::ArithmeticOverflow),
            None => Ok(Amount::ZERO),
        }
    }

    pub fn total_rewards_claimed(&self) -> Amount {
        self.total_rewards_claimed
    }

    pub fn last_height(&self) -> BlockHeight {
        self.last_height
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    pub fn record(&self, account: &AccountId) -> Option<&StakeRecord> {
        self.records.get(account)
    }

    pub fn account_count(&self) -> usize {
        self.records.len()
    }

    /// Recompute the staked supply from the records and compare it to the
    /// tracked total.
    pub fn verify_conservation(&self) -> bool {
        let mut sum = Amount::ZERO;
        for record in self.records.values() {
            match sum.checked_add(record.staked) {
                Some(s) => sum = s,
                None => return false,
            }
        }
        sum == self.total_staked
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn check_height(&self, height: BlockHeight) -> Result<(), StakingError> {
        if height < self.last_height {
            warn!(
                height = height.as_u64(),
                last = self.last_height.as_u64(),
                "rejected call with regressed block height"
            );
            return Err(StakingError::HeightRegression {
                current: height.as_u64(),
                last: self.last_height.as_u64(),
            });
        }
        Ok(())
    }

    /// Roll an existing record forward to `height` without changing its
    /// principal. Unknown accounts are left alone.
    fn settle_only(&mut self, caller: &AccountId, height: BlockHeight) -> Result<(), StakingError> {
        let Some(current) = self.records.get(caller) else {
            return Ok(());
        };
        let record = self.settle(caller, current, height)?;
        debug!(
            account = %caller,
            accrued_scaled = record.accrued_scaled,
            height = height.as_u64(),
            "zero-amount call settled rewards"
        );
        self.records.insert(caller.clone(), record);
        self.last_height = height;
        Ok(())
    }

    fn settle(
        &self,
        caller: &AccountId,
        record: &StakeRecord,
        height: BlockHeight,
    ) -> Result<StakeRecord, StakingError> {
        record
            .settled(&self.params, height)
            .ok_or_else(|| self.overflow(caller, "settle"))
    }

    fn overflow(&self, caller: &AccountId, op: &str) -> StakingError {
        warn!(account = %caller, op, "arithmetic overflow, operation aborted");
        StakingError::ArithmeticOverflow
    }
}

impl StakingLedger {
    /// Persist all ledger state to a stake store.
    ///
    /// Not atomic: each key is a separate write. Records go first and
    /// `total_staked` last, so a save cut short leaves records that disagree
    /// with the stored total and the conservation check in
    /// [`StakingLedger::load_from_store`] refuses them.
    pub fn save_to_store(&self, store: &dyn StakeStore) -> Result<(), StakingError> {
        for (account, record) in &self.records {
            store.put_record(account, &encode(record)?)?;
        }
        store.put_meta(META_PARAMS, &encode(&self.params)?)?;
        store.put_meta(
            META_TOTAL_CLAIMED,
            &self.total_rewards_claimed.micro().to_be_bytes(),
        )?;
        store.put_meta(META_LAST_HEIGHT, &self.last_height.as_u64().to_be_bytes())?;
        store.put_meta(META_TOTAL_STAKED, &self.total_staked.micro().to_be_bytes())?;
        debug!(accounts = self.records.len(), "ledger saved to store");
        Ok(())
    }

    /// Restore a ledger from a stake store.
    ///
    /// Stored parameters win over `fallback_params`, which only apply to a
    /// store that has never been written. The stored staked total must match
    /// the sum of the stored records.
    pub fn load_from_store(
        store: &dyn StakeStore,
        fallback_params: StakingParams,
    ) -> Result<Self, StakingError> {
        let params = match store.get_meta(META_PARAMS)? {
            Some(bytes) => decode(&bytes)?,
            None => fallback_params,
        };
        let total_staked = Amount::new(read_u128(store, META_TOTAL_STAKED)?);
        let total_rewards_claimed = Amount::new(read_u128(store, META_TOTAL_CLAIMED)?);
        let last_height = match store.get_meta(META_LAST_HEIGHT)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::Corruption("last_height has unexpected byte length".into())
                })?;
                BlockHeight::new(u64::from_be_bytes(arr))
            }
            None => BlockHeight::GENESIS,
        };

        let mut records = HashMap::new();
        for (account, bytes) in store.iter_records()? {
            let record: StakeRecord = decode(&bytes)?;
            records.insert(account, record);
        }

        let ledger = Self {
            params,
            records,
            total_staked,
            total_rewards_claimed,
            last_height,
            events: EventBus::new(),
        };
        if !ledger.verify_conservation() {
            return Err(StoreError::Corruption(
                "stored total_staked does not match the sum of stake records".into(),
            )
            .into());
        }
        debug!(accounts = ledger.records.len(), "ledger loaded from store");
        Ok(ledger)
    }
}

impl Default for StakingLedger {
    fn default() -> Self {
        Self::new(StakingParams::default())
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn read_u128(store: &dyn StakeStore, key: &[u8]) -> Result<u128, StoreError> {
    match store.get_meta(key)? {
        Some(bytes) => {
            let arr: [u8; 16] = bytes.as_slice().try_into().map_err(|_| {
                StoreError::Corruption(format!(
                    "{} has unexpected byte length",
                    String::from_utf8_lossy(key)
                ))
            })?;
            Ok(u128::from_be_bytes(arr))
        }
        None => Ok(0),
    }
}
