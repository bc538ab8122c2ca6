//! makefle: command-line tools for the staking ledger.

mod script;

use anyhow::Context;
use clap::Parser;
use makefle_staking::LedgerConfig;
use makefle_utils::LogFormat;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "makefle", about = "makefle staking ledger tools", version)]
struct Cli {
    /// Path to a TOML ledger configuration file.
    #[arg(long, env = "MAKEFLE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the config file; `RUST_LOG` overrides both.
    #[arg(long, env = "MAKEFLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "MAKEFLE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a TOML call script and print one JSON result per step.
    Replay {
        /// Path to the call script.
        script: PathBuf,

        /// Print a final summary line after the replay.
        #[arg(long)]
        summary: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let format: LogFormat = config.log_format.parse()?;
    makefle_utils::init_logging(format, &config.log_level)?;
    tracing::debug!(
        reward_rate = config.reward_rate,
        reward_scale = config.reward_scale,
        genesis = config.genesis_height,
        "configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Replay { script, summary } => {
            let parsed = script::Script::from_toml_file(&script)?;
            tracing::info!(
                "Replaying {} step(s) from {}",
                parsed.calls.len(),
                script.display()
            );
            let result = script::replay(&parsed, &config, &mut out)?;
            if summary {
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({
                        "calls": result.calls,
                        "failed": result.failed,
                        "final_height": result.final_height,
                        "total_staked": result.total_staked.to_string(),
                        "total_rewards_claimed": result.total_rewards_claimed.to_string(),
                    })
                )?;
            }
        }
        Command::Config => {
            write!(out, "{}", config.to_toml_string()?)?;
        }
    }

    Ok(())
}
