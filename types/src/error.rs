//! Parse errors for the shared types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MakefleError {
    #[error("invalid account identifier: {0:?}")]
    InvalidAccount(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}
