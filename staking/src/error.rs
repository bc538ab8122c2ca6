//! Staking errors and their stable numeric codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakingError {
    #[error("insufficient staked balance: requested {requested}, staked {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("arithmetic overflow in staking computation")]
    ArithmeticOverflow,

    #[error("block height {current} precedes last processed height {last}")]
    HeightRegression { current: u64, last: u64 },

    #[error("storage error: {0}")]
    Store(#[from] makefle_store::StoreError),
}

impl StakingError {
    pub const INSUFFICIENT_BALANCE: u32 = 101;
    pub const ARITHMETIC_OVERFLOW: u32 = 102;
    pub const HEIGHT_REGRESSION: u32 = 103;
    pub const STORE_FAILURE: u32 = 500;

    /// Numeric code reported to callers as `(err uN)`.
    pub fn code(&self) -> u32 {
        match self {
            Self::InsufficientBalance { .. } => Self::INSUFFICIENT_BALANCE,
            Self::ArithmeticOverflow => Self::ARITHMETIC_OVERFLOW,
            Self::HeightRegression { .. } => Self::HEIGHT_REGRESSION,
            Self::Store(_) => Self::STORE_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_maps_to_101() {
        let err = StakingError::InsufficientBalance {
            requested: 2_000_000,
            available: 1_000_000,
        };
        assert_eq!(err.code(), 101);
        assert_eq!(
            err.to_string(),
            "insufficient staked balance: requested 2000000, staked 1000000"
        );
    }

    #[test]
    fn store_errors_convert() {
        let err: StakingError = makefle_store::StoreError::Backend("disk".into()).into();
        assert_eq!(err.code(), StakingError::STORE_FAILURE);
    }
}
