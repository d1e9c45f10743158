//! Process configuration loaded from the environment

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::signals::threshold::{RsiThresholds, ThresholdError};

/// Trading pair watched by the service
pub const SYMBOL: &str = "SOLUSDT";
/// Candle interval in Bybit notation (minutes)
pub const INTERVAL: &str = "60";

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_EVAL_INTERVAL_SECONDS: u64 = 3600;
pub const DEFAULT_CYCLE_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_FETCH_MAX_RETRIES: usize = 3;
pub const DEFAULT_FETCH_RETRY_DELAY_SECONDS: u64 = 60;
pub const DEFAULT_BYBIT_BASE_URL: &str = "https://api-testnet.bybit.com";
pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
}

/// Get the deployment environment name (`APP_ENV`), defaulting to sandbox
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Runtime settings for one process
#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub channel_id: u64,
    pub symbol: String,
    pub interval: String,
    pub rsi_period: usize,
    pub thresholds: RsiThresholds,
    pub eval_interval_seconds: u64,
    pub cycle_timeout: Duration,
    pub fetch_max_retries: usize,
    pub fetch_retry_delay: Duration,
    pub bybit_base_url: String,
    pub discord_api_url: String,
    pub http_port: Option<u16>,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let channel_id = required(&lookup, "CHANNEL_ID")?;

        let rsi_period: usize = optional(&lookup, "RSI_PERIOD", DEFAULT_RSI_PERIOD)?;
        if rsi_period == 0 {
            return Err(ConfigError::Invalid {
                var: "RSI_PERIOD",
                value: "0".to_string(),
            });
        }

        let thresholds = RsiThresholds::new(
            optional(&lookup, "RSI_OVERBOUGHT", RsiThresholds::DEFAULT_OVERBOUGHT)?,
            optional(&lookup, "RSI_OVERSOLD", RsiThresholds::DEFAULT_OVERSOLD)?,
        )?;

        let eval_interval_seconds =
            optional(&lookup, "EVAL_INTERVAL_SECONDS", DEFAULT_EVAL_INTERVAL_SECONDS)?;
        if eval_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                var: "EVAL_INTERVAL_SECONDS",
                value: "0".to_string(),
            });
        }

        let cycle_timeout_seconds: u64 =
            optional(&lookup, "CYCLE_TIMEOUT_SECONDS", DEFAULT_CYCLE_TIMEOUT_SECONDS)?;
        if cycle_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                var: "CYCLE_TIMEOUT_SECONDS",
                value: "0".to_string(),
            });
        }

        let http_port = match lookup("PORT") {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?),
            None => None,
        };

        Ok(Self {
            discord_token,
            channel_id,
            symbol: SYMBOL.to_string(),
            interval: INTERVAL.to_string(),
            rsi_period,
            thresholds,
            eval_interval_seconds,
            cycle_timeout: Duration::from_secs(cycle_timeout_seconds),
            fetch_max_retries: optional(&lookup, "FETCH_MAX_RETRIES", DEFAULT_FETCH_MAX_RETRIES)?,
            fetch_retry_delay: Duration::from_secs(optional(
                &lookup,
                "FETCH_RETRY_DELAY_SECONDS",
                DEFAULT_FETCH_RETRY_DELAY_SECONDS,
            )?),
            bybit_base_url: lookup("BYBIT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BYBIT_BASE_URL.to_string()),
            discord_api_url: lookup("DISCORD_API_URL")
                .unwrap_or_else(|| DEFAULT_DISCORD_API_URL.to_string()),
            http_port,
        })
    }

    /// Number of candles needed for one evaluation (one extra for differencing)
    pub fn candle_window(&self) -> usize {
        self.rsi_period + 1
    }
}

fn required<F, T>(lookup: &F, var: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(var).ok_or(ConfigError::Missing(var))?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}

fn optional<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}
