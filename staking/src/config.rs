//! Ledger configuration with TOML file support.

use makefle_types::{BlockHeight, StakingParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a staking ledger instance.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Reward micro-units per block per `reward_scale` staked micro-units.
    #[serde(default = "default_reward_rate")]
    pub reward_rate: u64,

    /// Fixed-point denominator of the reward formula. Must be non-zero and,
    /// when `reward_rate` is non-zero, no larger than it.
    #[serde(default = "default_reward_scale")]
    pub reward_scale: u64,

    /// Block height the ledger clock starts from.
    #[serde(default)]
    pub genesis_height: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_reward_rate() -> u64 {
    StakingParams::DEFAULT_REWARD_RATE as u64
}

fn default_reward_scale() -> u64 {
    StakingParams::DEFAULT_REWARD_SCALE as u64
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reward_scale == 0 {
            return Err(ConfigError::Invalid("reward_scale must be non-zero".into()));
        }
        if !self.params().pays_every_block() {
            return Err(ConfigError::Invalid(format!(
                "reward_scale {} exceeds reward_rate {}; small stakes would stop accruing",
                self.reward_scale, self.reward_rate
            )));
        }
        match self.log_format.as_str() {
            "human" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "log_format must be \"human\" or \"json\", got {other:?}"
            ))),
        }
    }

    pub fn params(&self) -> StakingParams {
        StakingParams::new(self.reward_rate as u128, self.reward_scale as u128)
    }

    pub fn genesis(&self) -> BlockHeight {
        BlockHeight::new(self.genesis_height)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            reward_rate: default_reward_rate(),
            reward_scale: default_reward_scale(),
            genesis_height: 0,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LedgerConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = LedgerConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.reward_rate, 100);
        assert_eq!(config.reward_scale, 1);
        assert_eq!(config.params(), StakingParams::makefle_defaults());
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            reward_rate = 250
            genesis_height = 1200
        "#;
        let config = LedgerConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.reward_rate, 250);
        assert_eq!(config.genesis(), BlockHeight::new(1200));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn zero_scale_is_invalid() {
        let err = LedgerConfig::from_toml_str("reward_scale = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn scale_above_nonzero_rate_is_invalid() {
        let err = LedgerConfig::from_toml_str("reward_scale = 1000000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config = LedgerConfig::from_toml_str("reward_rate = 300\nreward_scale = 3").unwrap();
        assert_eq!(config.params(), StakingParams::new(300, 3));

        // Nothing accrues at rate zero, so any non-zero scale is fine.
        LedgerConfig::from_toml_str("reward_rate = 0\nreward_scale = 1000000").unwrap();
    }

    #[test]
    fn unknown_log_format_is_invalid() {
        let err = LedgerConfig::from_toml_str("log_format = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reward_rate = 5\nlog_format = \"json\"").unwrap();
        let config = LedgerConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.reward_rate, 5);
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = LedgerConfig::from_toml_file("/nonexistent/makefle.toml");
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
