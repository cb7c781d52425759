//! Scan configuration — one immutable value instead of scattered globals.
//!
//! Defaults mirror the loosened production dials. Every field has a serde
//! default so a partial TOML file (or an empty one) still parses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// All dials the scanner reads. Cloned freely; never mutated mid-scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Bar interval requested from the provider ("1d", "1h", ...).
    pub interval: String,
    /// History length requested from the provider ("1y", "6mo", ...).
    pub period: String,
    /// Volume-ratio multiplier for the breakout mode.
    pub vol_mult: f64,
    /// RSI momentum floor.
    pub rsi_min: f64,
    /// ATR multiplier for the volatility stop.
    pub atr_stop_mult: f64,
    /// ATR multiplier for the trailing-stop distance.
    pub atr_trail_mult: f64,
    /// Window for the prior N-bar high (excluding the current bar).
    pub breakout_lookback: usize,
    /// Collect failure-reason sets for symbols with no signal.
    pub diagnostics: bool,
    /// Render a report even when nothing fired.
    pub send_empty_reports: bool,
    /// Cap on lines per rendered message.
    pub max_per_msg: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval: "1d".into(),
            period: "1y".into(),
            vol_mult: 1.15,
            rsi_min: 45.0,
            atr_stop_mult: 1.5,
            atr_trail_mult: 3.0,
            breakout_lookback: 12,
            diagnostics: false,
            send_empty_reports: true,
            max_per_msg: 30,
        }
    }
}

impl ScanConfig {
    /// Parse from a TOML string; missing keys fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Minimum bar count required before any decision is attempted.
    pub fn min_history(&self) -> usize {
        50usize.max(self.breakout_lookback + 5)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.breakout_lookback == 0 {
            return Err(ConfigError::Invalid("breakout_lookback must be >= 1".into()));
        }
        if self.vol_mult <= 0.0 {
            return Err(ConfigError::Invalid("vol_mult must be positive".into()));
        }
        if !(0.0..=100.0).contains(&self.rsi_min) {
            return Err(ConfigError::Invalid("rsi_min must be in [0, 100]".into()));
        }
        Ok(())
    }
}
