//! Threshold and weight configuration
//!
//! Both files are JSON and keep the field names existing deployments already
//! use, so a `thresholds.json` / `weights.json` pair can be dropped in as is.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Signal thresholds, loaded once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Pairs to evaluate, in processing order
    pub pairs: Vec<String>,

    /// Moving average periods
    pub ema_fast: usize,
    pub ema_slow: usize,

    /// RSI must be strictly above this for a buy
    pub rsi_buy: f64,
    /// RSI must be strictly below this for a sell
    pub rsi_sell: f64,

    /// Bollinger band width in standard deviations
    pub bb_mult: f64,

    /// Minimum short-timeframe ATR for the volatility gate to pass
    pub atr_low_cut: f64,

    /// Minimum post-gate confidence to emit, in [0, 1]
    pub confidence_min: f64,
}

impl ThresholdConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(ConfigError::invalid("pairs", "at least one pair is required"));
        }

        if let Some(blank) = self.pairs.iter().find(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "pairs",
                format!("blank pair identifier {:?}", blank),
            ));
        }

        if self.ema_fast == 0 || self.ema_slow == 0 {
            return Err(ConfigError::invalid("ema_fast/ema_slow", "periods must be positive"));
        }

        if self.ema_fast >= self.ema_slow {
            return Err(ConfigError::invalid(
                "ema_fast",
                format!(
                    "fast period {} must be shorter than slow period {}",
                    self.ema_fast, self.ema_slow
                ),
            ));
        }

        if !(0.0..=100.0).contains(&self.rsi_sell)
            || !(0.0..=100.0).contains(&self.rsi_buy)
            || self.rsi_sell > self.rsi_buy
        {
            return Err(ConfigError::invalid(
                "rsi_buy/rsi_sell",
                format!(
                    "expected 0 <= rsi_sell ({}) <= rsi_buy ({}) <= 100",
                    self.rsi_sell, self.rsi_buy
                ),
            ));
        }

        if !(self.bb_mult.is_finite() && self.bb_mult > 0.0) {
            return Err(ConfigError::invalid("bb_mult", "must be a positive number"));
        }

        if !(self.atr_low_cut.is_finite() && self.atr_low_cut >= 0.0) {
            return Err(ConfigError::invalid("atr_low_cut", "must be non-negative"));
        }

        if !(0.0..=1.0).contains(&self.confidence_min) {
            return Err(ConfigError::invalid(
                "confidence_min",
                format!("{} is outside [0, 1]", self.confidence_min),
            ));
        }

        Ok(())
    }
}

/// Per-indicator contribution weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub indicators: IndicatorWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorWeights {
    #[serde(rename = "EMA")]
    pub ema: f64,
    #[serde(rename = "RSI")]
    pub rsi: f64,
    #[serde(rename = "BOLL")]
    pub boll: f64,
}

impl WeightConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Score awarded to a confirmed Buy or Sell
    pub fn confirmation_score(&self) -> f64 {
        self.indicators.ema + self.indicators.rsi + self.indicators.boll
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("indicators.EMA", self.indicators.ema),
            ("indicators.RSI", self.indicators.rsi),
            ("indicators.BOLL", self.indicators.boll),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("weight {} must be finite and non-negative", value),
                ));
            }
        }
        Ok(())
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
