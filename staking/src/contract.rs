//! Named contract-call surface over the staking ledger.
//!
//! A transaction layer submits public calls (`stake`, `unstake`,
//! `claim-rewards`) with a sender and the current block height; a query
//! executor evaluates read-only calls without submitting a transaction.
//! Results are either `(ok value)` or `(err uN)` with the numeric code of the
//! underlying [`StakingError`].

use crate::engine::StakingLedger;
use crate::error::StakingError;
use makefle_types::{AccountId, Amount, BlockHeight, MakefleError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const FN_STAKE: &str = "stake";
pub const FN_UNSTAKE: &str = "unstake";
pub const FN_CLAIM_REWARDS: &str = "claim-rewards";
pub const FN_GET_STAKED_BALANCE: &str = "get-staked-balance";
pub const FN_GET_TOTAL_STAKED: &str = "get-total-staked";
pub const FN_GET_PENDING_REWARDS: &str = "get-pending-rewards";
pub const FN_GET_REWARD_RATE: &str = "get-reward-rate";

/// A call argument or result value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Uint(u128),
    Bool(bool),
    Principal(AccountId),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(n) => write!(f, "u{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Principal(p) => write!(f, "'{p}"),
        }
    }
}

impl FromStr for Value {
    type Err = MakefleError;

    /// `u123` is a uint, `true`/`false` a bool, anything else a principal
    /// (an optional leading `'` is stripped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => return Ok(Self::Bool(true)),
            "false" => return Ok(Self::Bool(false)),
            _ => {}
        }
        if let Some(digits) = s.strip_prefix('u') {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
                return s.parse::<Amount>().map(|a| Self::Uint(a.micro()));
            }
        }
        AccountId::parse(s.strip_prefix('\'').unwrap_or(s)).map(Self::Principal)
    }
}

/// Outcome of a contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallResult {
    Ok(Value),
    Err(u32),
}

impl CallResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    fn from_ledger<T>(result: Result<T, StakingError>, wrap: impl FnOnce(T) -> Value) -> Self {
        match result {
            Ok(v) => Self::Ok(wrap(v)),
            Err(e) => Self::Err(e.code()),
        }
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(v) => write!(f, "(ok {v})"),
            Self::Err(code) => write!(f, "(err u{code})"),
        }
    }
}

/// A call that could not be dispatched at all (never reaches the ledger).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{0} is read-only; use a read-only call")]
    ReadOnlyFunction(String),

    #[error("{0} is public; submit it as a transaction")]
    PublicFunction(String),

    #[error("{function} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("{function} argument {index} must be a {expected}")]
    ArgumentType {
        function: String,
        index: usize,
        expected: &'static str,
    },
}

/// A state-mutating call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicCall {
    Stake { amount: Amount },
    Unstake { amount: Amount },
    ClaimRewards,
}

impl PublicCall {
    pub fn parse(function: &str, args: &[Value]) -> Result<Self, CallError> {
        match function {
            FN_STAKE => Ok(Self::Stake {
                amount: single_uint(function, args)?,
            }),
            FN_UNSTAKE => Ok(Self::Unstake {
                amount: single_uint(function, args)?,
            }),
            FN_CLAIM_REWARDS => {
                expect_arity(function, args, 0)?;
                Ok(Self::ClaimRewards)
            }
            FN_GET_STAKED_BALANCE | FN_GET_TOTAL_STAKED | FN_GET_PENDING_REWARDS
            | FN_GET_REWARD_RATE => Err(CallError::ReadOnlyFunction(function.to_string())),
            other => Err(CallError::UnknownFunction(other.to_string())),
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Stake { .. } => FN_STAKE,
            Self::Unstake { .. } => FN_UNSTAKE,
            Self::ClaimRewards => FN_CLAIM_REWARDS,
        }
    }
}

/// A view evaluated without a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadOnlyCall {
    GetStakedBalance { account: AccountId },
    GetTotalStaked,
    GetPendingRewards { account: AccountId },
    GetRewardRate,
}

impl ReadOnlyCall {
    pub fn parse(function: &str, args: &[Value]) -> Result<Self, CallError> {
        match function {
            FN_GET_STAKED_BALANCE => Ok(Self::GetStakedBalance {
                account: single_principal(function, args)?,
            }),
            FN_GET_TOTAL_STAKED => {
                expect_arity(function, args, 0)?;
                Ok(Self::GetTotalStaked)
            }
            FN_GET_PENDING_REWARDS => Ok(Self::GetPendingRewards {
                account: single_principal(function, args)?,
            }),
            FN_GET_REWARD_RATE => {
                expect_arity(function, args, 0)?;
                Ok(Self::GetRewardRate)
            }
            FN_STAKE | FN_UNSTAKE | FN_CLAIM_REWARDS => {
                Err(CallError::PublicFunction(function.to_string()))
            }
            other => Err(CallError::UnknownFunction(other.to_string())),
        }
    }
}

fn expect_arity(function: &str, args: &[Value], expected: usize) -> Result<(), CallError> {
    if args.len() != expected {
        return Err(CallError::ArgumentCount {
            function: function.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn single_uint(function: &str, args: &[Value]) -> Result<Amount, CallError> {
    expect_arity(function, args, 1)?;
    match &args[0] {
        Value::Uint(n) => Ok(Amount::new(*n)),
        _ => Err(CallError::ArgumentType {
            function: function.to_string(),
            index: 0,
            expected: "uint",
        }),
    }
}

fn single_principal(function: &str, args: &[Value]) -> Result<AccountId, CallError> {
    expect_arity(function, args, 1)?;
    match &args[0] {
        Value::Principal(p) => Ok(p.clone()),
        _ => Err(CallError::ArgumentType {
            function: function.to_string(),
            index: 0,
            expected: "principal",
        }),
    }
}

/// The deployed staking contract: a ledger plus name-based dispatch.
pub struct Contract {
    ledger: StakingLedger,
}

impl Contract {
    pub fn new(ledger: StakingLedger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &StakingLedger {
        &self.ledger
    }

    /// Parse and execute a public call on behalf of `sender`.
    pub fn call_public(
        &mut self,
        sender: &AccountId,
        function: &str,
        args: &[Value],
        height: BlockHeight,
    ) -> Result<CallResult, CallError> {
        let call = PublicCall::parse(function, args)?;
        Ok(self.execute(sender, &call, height))
    }

    /// Execute an already-parsed public call.
    pub fn execute(&mut self, sender: &AccountId, call: &PublicCall, height: BlockHeight) -> CallResult {
        match call {
            PublicCall::Stake { amount } => CallResult::from_ledger(
                self.ledger.stake(sender, *amount, height),
                |()| Value::Bool(true),
            ),
            PublicCall::Unstake { amount } => CallResult::from_ledger(
                self.ledger.unstake(sender, *amount, height),
                |()| Value::Bool(true),
            ),
            PublicCall::ClaimRewards => CallResult::from_ledger(
                self.ledger.claim_rewards(sender, height),
                |claimed| Value::Uint(claimed.micro()),
            ),
        }
    }

    /// Parse and evaluate a read-only call at `height`.
    pub fn call_read_only(
        &self,
        function: &str,
        args: &[Value],
        height: BlockHeight,
    ) -> Result<CallResult, CallError> {
        let call = ReadOnlyCall::parse(function, args)?;
        Ok(self.query(&call, height))
    }

    /// Evaluate an already-parsed read-only call.
    pub fn query(&self, call: &ReadOnlyCall, height: BlockHeight) -> CallResult {
        match call {
            ReadOnlyCall::GetStakedBalance { account } => {
                CallResult::Ok(Value::Uint(self.ledger.staked_balance(account).micro()))
            }
            ReadOnlyCall::GetTotalStaked => {
                CallResult::Ok(Value::Uint(self.ledger.total_staked().micro()))
            }
            ReadOnlyCall::GetPendingRewards { account } => CallResult::from_ledger(
                self.ledger.pending_rewards(account, height),
                |pending| Value::Uint(pending.micro()),
            ),
            ReadOnlyCall::GetRewardRate => CallResult::Ok(Value::Uint(self.ledger.reward_rate())),
        }
    }
}

impl Default for Contract {
    fn default() -> Self {
        Self::new(StakingLedger::default())
    }
}
