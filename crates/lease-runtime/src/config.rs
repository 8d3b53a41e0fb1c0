//! # Runtime Configuration
//!
//! Unified configuration for every subsystem plus runtime parameters.
//! Defaults are the production policy; environment variables override them.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LL_LOG_LEVEL` or `RUST_LOG` | `telemetry.log_level` |
//! | `LL_JSON_LOGS` | `telemetry.json_logs` |
//! | `LL_DISPUTE_WINDOW_SECS` | `ledger.dispute_window_secs` |
//! | `LL_COLLATERAL_RATIO_BPS` | `rental.collateral_ratio_bps` |
//! | `LL_SWAP_FEE_BPS` | `rental.swap_fee_bps` |
//! | `LL_PLATFORM_FEE_BPS` | `rental.platform_fee_bps` |
//! | `LL_ESCROW_POLICY` | `rental.escrow_policy` |
//! | `LL_DATA_DIR` | `storage.data_dir` |

use ll_02_channel_ledger::LedgerConfig;
use ll_05_rental_engine::{EscrowPolicy, RentalConfig};
use shared_types::BPS_DENOMINATOR;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct LeaseConfig {
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Channel Ledger policy.
    pub ledger: LedgerConfig,
    /// Rental Engine policy.
    pub rental: RentalConfig,
    /// Snapshot storage.
    pub storage: StorageConfig,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup banner.
    pub service_name: String,
    /// Filter directive (trace, debug, info, warn, error or a full `EnvFilter` string).
    pub log_level: String,
    /// JSON formatted logs instead of human-readable ones.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "liquidity-lease".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the snapshot file.
    pub data_dir: PathBuf,
    /// Snapshot file name inside `data_dir`.
    pub snapshot_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            snapshot_file: "lease-snapshot.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// A basis-point field exceeds 100%.
    #[error("{field} must be at most 10000 bps, got {bps}")]
    FeeOutOfRange {
        /// Offending field
        field: &'static str,
        /// Configured value
        bps: u64,
    },

    /// Collateral ratio is zero.
    #[error("collateral_ratio_bps must be positive")]
    ZeroCollateralRatio,

    /// Dispute window is zero.
    #[error("dispute_window_secs must be positive")]
    ZeroDisputeWindow,

    /// Duration bounds are empty or inverted.
    #[error("Invalid rental duration bounds: min {min}, max {max}")]
    InvalidDurationBounds {
        /// Configured minimum
        min: u64,
        /// Configured maximum
        max: u64,
    },
}

impl LeaseConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("LL_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.telemetry.log_level = level;
        }
        if let Some(raw) = lookup("LL_JSON_LOGS") {
            config.telemetry.json_logs = parse_flag("LL_JSON_LOGS", &raw)?;
        }
        if let Some(secs) = parse_var(&lookup, "LL_DISPUTE_WINDOW_SECS")? {
            config.ledger.dispute_window_secs = secs;
        }
        if let Some(bps) = parse_var(&lookup, "LL_COLLATERAL_RATIO_BPS")? {
            config.rental.collateral_ratio_bps = bps;
        }
        if let Some(bps) = parse_var(&lookup, "LL_SWAP_FEE_BPS")? {
            config.rental.swap_fee_bps = bps;
        }
        if let Some(bps) = parse_var(&lookup, "LL_PLATFORM_FEE_BPS")? {
            config.rental.platform_fee_bps = bps;
        }
        if let Some(policy) = parse_var::<EscrowPolicy, _>(&lookup, "LL_ESCROW_POLICY")? {
            config.rental.escrow_policy = policy;
        }
        if let Some(dir) = lookup("LL_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Reject values no subsystem can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.dispute_window_secs == 0 {
            return Err(ConfigError::ZeroDisputeWindow);
        }
        if self.rental.collateral_ratio_bps == 0 {
            return Err(ConfigError::ZeroCollateralRatio);
        }
        for (field, bps) in [
            ("swap_fee_bps", self.rental.swap_fee_bps),
            ("platform_fee_bps", self.rental.platform_fee_bps),
        ] {
            if bps > BPS_DENOMINATOR {
                return Err(ConfigError::FeeOutOfRange { field, bps });
            }
        }
        let (min, max) = (self.rental.min_duration_secs, self.rental.max_duration_secs);
        if min == 0 || min > max {
            return Err(ConfigError::InvalidDurationBounds { min, max });
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
