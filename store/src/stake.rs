//! Stake record storage trait.

use crate::StoreError;
use makefle_types::AccountId;

/// Keyed store of per-account stake records plus ledger-wide scalars.
///
/// Uses opaque `Vec<u8>` values. The ledger serializes and deserializes its
/// own record and scalar types.
pub trait StakeStore {
    fn put_record(&self, account: &AccountId, record: &[u8]) -> Result<(), StoreError>;
    fn iter_records(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
