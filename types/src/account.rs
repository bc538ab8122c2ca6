//! Account identifier type.

use crate::MakefleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque key identifying a ledger participant.
///
/// Usually a standard principal (`ST...` / `SP...`) or a contract principal
/// (`<address>.<contract-name>`). The ledger never interprets the contents
/// beyond equality and ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from a raw string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse an account identifier, rejecting empty or whitespace-bearing input.
    pub fn parse(raw: &str) -> Result<Self, MakefleError> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(MakefleError::InvalidAccount(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = MakefleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
