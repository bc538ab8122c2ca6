//! Token amount type.
//!
//! Amounts are integers (u128) counted in the token's smallest indivisible
//! unit, called micro-units here. There are no fractional amounts.

use crate::MakefleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A staked or rewarded amount in micro-units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(micro: u128) -> Self {
        Self(micro)
    }

    pub fn micro(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = MakefleError;

    /// Parses a plain decimal count of micro-units, with optional `u` prefix
    /// (`u1000000`) as written for unsigned call arguments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('u').unwrap_or(s).replace('_', "");
        digits
            .parse::<u128>()
            .map(Self)
            .map_err(|_| MakefleError::InvalidAmount(s.to_string()))
    }
}
