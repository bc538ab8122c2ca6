//! Call scripts: a TOML list of contract calls replayed on a simulated chain.
//!
//! ```toml
//! [[call]]
//! sender = "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5"
//! function = "stake"
//! args = ["u1000000"]
//!
//! [[call]]
//! mine = 10
//! function = "get-pending-rewards"
//! args = ["'ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5"]
//! ```
//!
//! Each public call is mined into its own block, so the clock advances by one
//! after it. Read-only calls are evaluated at the current height without
//! mining. `mine` advances the chain by that many empty blocks first.

use anyhow::{bail, Context};
use makefle_nullables::NullBlockClock;
use makefle_staking::{CallError, Contract, LedgerConfig, ReadOnlyCall, StakingLedger, Value};
use makefle_types::{AccountId, BlockClock};
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default, rename = "call")]
    pub calls: Vec<ScriptStep>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptStep {
    /// Empty blocks to mine before this step.
    #[serde(default)]
    pub mine: u64,
    pub sender: Option<String>,
    pub function: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Script {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("failed to parse script")
    }
}

/// Totals reported once a replay finishes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub calls: usize,
    pub failed: usize,
    pub final_height: u64,
    pub total_staked: u128,
    pub total_rewards_claimed: u128,
}

/// Replay `script` against a fresh ledger built from `config`, writing one
/// JSON line per step to `out`.
pub fn replay(
    script: &Script,
    config: &LedgerConfig,
    out: &mut impl Write,
) -> anyhow::Result<ReplaySummary> {
    let clock = NullBlockClock::new(config.genesis_height);
    let mut ledger = StakingLedger::with_genesis(config.params(), config.genesis());
    ledger.subscribe(Box::new(|event| {
        tracing::debug!(account = %event.account(), ?event, "ledger event");
    }));
    let mut contract = Contract::new(ledger);
    let mut summary = ReplaySummary::default();

    for (index, step) in script.calls.iter().enumerate() {
        let step_no = index + 1;
        if step.mine > 0 {
            clock.mine_empty_blocks(step.mine);
        }
        let Some(function) = step.function.as_deref() else {
            writeln!(
                out,
                "{}",
                json!({ "step": step_no, "mined": step.mine, "height": clock.current_height().as_u64() })
            )?;
            continue;
        };

        let args = step
            .args
            .iter()
            .map(|a| a.parse::<Value>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("step {step_no}: invalid argument"))?;
        let height = clock.current_height();

        let (result, sender) = match ReadOnlyCall::parse(function, &args) {
            Ok(call) => (contract.query(&call, height), None),
            Err(CallError::PublicFunction(_)) => {
                let Some(sender) = step.sender.as_deref() else {
                    bail!("step {step_no}: public call {function} needs a sender");
                };
                let sender = AccountId::parse(sender)
                    .with_context(|| format!("step {step_no}: invalid sender"))?;
                let result = contract
                    .call_public(&sender, function, &args, height)
                    .with_context(|| format!("step {step_no}"))?;
                clock.mine_block();
                (result, Some(sender))
            }
            Err(e) => return Err(e).with_context(|| format!("step {step_no}")),
        };

        summary.calls += 1;
        if !result.is_ok() {
            summary.failed += 1;
            tracing::info!(step = step_no, function, %result, "call returned an error");
        }
        writeln!(
            out,
            "{}",
            json!({
                "step": step_no,
                "height": height.as_u64(),
                "sender": sender.map(|s| s.to_string()),
                "function": function,
                "args": step.args,
                "result": result.to_string(),
                "ok": result.is_ok(),
            })
        )?;
    }

    let ledger = contract.ledger();
    summary.final_height = clock.current_height().as_u64();
    summary.total_staked = ledger.total_staked().micro();
    summary.total_rewards_claimed = ledger.total_rewards_claimed().micro();
    Ok(summary)
}
