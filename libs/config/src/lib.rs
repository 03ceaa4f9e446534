//! # Signal Service Configuration
//!
//! Loads the three configuration inputs of a run and validates them before any
//! pair is processed.
//!
//! ## Inputs
//!
//! - **Thresholds** (`thresholds.json`): pairs, moving-average periods, RSI
//!   thresholds, band multiplier, volatility cutoff, minimum confidence
//! - **Weights** (`weights.json`): per-indicator contribution weights
//! - **Runner** (TOML, optional): file locations, intervals, fetch policy,
//!   concurrency, notification credentials
//!
//! All three are plain immutable values. They are loaded once in `main` and
//! passed down by reference; nothing in the workspace reads them from globals.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::Settings;
//!
//! let settings = Settings::load(Some(std::path::Path::new("configs/mtf_signals.toml")))?;
//! println!("evaluating {} pairs", settings.thresholds.pairs.len());
//! # Ok::<(), config::ConfigError>(())
//! ```

pub mod error;
pub mod runner_config;
pub mod service;
pub mod thresholds;

use std::collections::HashMap;
use std::path::Path;

pub use error::{ConfigError, Result};
pub use runner_config::{
    FetchConfig, FetchFailurePolicy, GateConfig, IndicatorPeriods, MarketDataConfig, PathConfig,
    RunnerConfig, TelegramConfig,
};
pub use thresholds::{IndicatorWeights, ThresholdConfig, WeightConfig};

/// Everything a run needs, validated
#[derive(Debug, Clone)]
pub struct Settings {
    pub thresholds: ThresholdConfig,
    pub weights: WeightConfig,
    pub runner: RunnerConfig,
}

impl Settings {
    /// Load runner config (defaults when absent) with env overrides, then
    /// load and validate thresholds and weights from the configured paths.
    pub fn load(runner_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(runner_path, None)
    }

    /// [`Settings::load`] with `env` standing in for the process environment
    pub fn load_with_env(
        runner_path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut runner = RunnerConfig::load_with_env(runner_path, env)?;
        runner.expand_env_vars()?;

        let thresholds = ThresholdConfig::from_file(&runner.paths.thresholds)?;
        let weights = WeightConfig::from_file(&runner.paths.weights)?;

        let settings = Self {
            thresholds,
            weights,
            runner,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.weights.validate()?;
        self.runner.validate()?;
        Ok(())
    }
}
