//! Nullable store: thread-safe in-memory storage for testing.

use makefle_store::{StakeStore, StoreError};
use makefle_types::AccountId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// An in-memory stake store for testing.
///
/// Records iterate in account order so replays are deterministic. Writes can
/// be made to fail on demand, immediately or after a budget of successful
/// writes, to exercise error paths and interrupted saves.
pub struct NullStakeStore {
    records: Mutex<BTreeMap<AccountId, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
    /// Writes still allowed; `None` means unlimited.
    write_budget: Mutex<Option<u64>>,
}

impl NullStakeStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(HashMap::new()),
            write_budget: Mutex::new(None),
        }
    }

    /// Make every subsequent write return `StoreError::Backend`, or lift the
    /// restriction again.
    pub fn fail_writes(&self, fail: bool) {
        *self.write_budget.lock().unwrap() = fail.then_some(0);
    }

    /// Allow `writes` more writes, then fail every one after that.
    pub fn fail_writes_after(&self, writes: u64) {
        *self.write_budget.lock().unwrap() = Some(writes);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        let mut budget = self.write_budget.lock().unwrap();
        match budget.as_mut() {
            None => Ok(()),
            Some(0) => Err(StoreError::Backend("writes disabled".into())),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
        }
    }
}

impl Default for NullStakeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StakeStore for NullStakeStore {
    fn put_record(&self, account: &AccountId, record: &[u8]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.records
            .lock()
            .unwrap()
            .insert(account.clone(), record.to_vec());
        Ok(())
    }

    fn iter_records(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
