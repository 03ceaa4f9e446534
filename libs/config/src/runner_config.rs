//! Runner Configuration Module
//!
//! Everything about *how* a run executes rather than *what* it decides:
//! file locations, candle source settings, fetch failure handling,
//! concurrency, stub quality gates and notification credentials.
//!
//! Layered with config-rs: the optional TOML file first, then
//! `MTF_<SECTION>__<FIELD>` variables, then the fixed variable names in
//! [`service::env::ALIASES`]. Every section is optional.

use crate::error::{ConfigError, Result};
use crate::service;
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main runner configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub paths: PathConfig,
    pub market_data: MarketDataConfig,
    pub fetch: FetchConfig,
    pub gates: GateConfig,
    pub indicators: IndicatorPeriods,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub thresholds: PathBuf,
    pub weights: PathBuf,
    pub state: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub short_interval: String,
    pub medium_interval: String,
    pub candle_limit: usize,
    pub http_timeout_secs: u64,
}

/// What a candle fetch failure does to the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Abort the whole run: no notifications, no state write
    #[default]
    FailFast,
    /// Log the failure and continue with the remaining pairs
    SkipPair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub policy: FetchFailurePolicy,
    /// Extra attempts after the first failure
    pub retry_attempts: u32,
    /// Backoff before the first retry, doubled each further attempt
    pub retry_backoff_ms: u64,
    /// Pairs processed concurrently; 1 keeps the run sequential
    pub max_concurrent_pairs: usize,
}

/// Quality gates with no data source yet.
///
/// Spread and volume checks are not implemented; these values are reported
/// as the gate outcome verbatim and default to passing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub spread_ok: bool,
    pub volume_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub bollinger: usize,
    pub atr: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_base_url: String,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    /// Alert headline, after the fixed marker
    pub alert_headline: String,
    /// Label of the confidence line
    pub confidence_label: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            thresholds: PathBuf::from(service::paths::THRESHOLDS),
            weights: PathBuf::from(service::paths::WEIGHTS),
            state: PathBuf::from(service::paths::STATE),
        }
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: service::market_data::BINANCE_BASE_URL.to_string(),
            short_interval: service::market_data::SHORT_INTERVAL.to_string(),
            medium_interval: service::market_data::MEDIUM_INTERVAL.to_string(),
            candle_limit: service::market_data::CANDLE_LIMIT,
            http_timeout_secs: service::market_data::HTTP_TIMEOUT_SECS,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            policy: FetchFailurePolicy::default(),
            retry_attempts: service::fetch::RETRY_ATTEMPTS,
            retry_backoff_ms: service::fetch::RETRY_BACKOFF_MS,
            max_concurrent_pairs: service::fetch::MAX_CONCURRENT_PAIRS,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            spread_ok: true,
            volume_ok: true,
        }
    }
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: service::indicators::RSI_PERIOD,
            bollinger: service::indicators::BOLLINGER_PERIOD,
            atr: service::indicators::ATR_PERIOD,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: service::telegram::API_BASE_URL.to_string(),
            bot_token: None,
            chat_id: None,
            alert_headline: service::telegram::ALERT_HEADLINE.to_string(),
            confidence_label: service::telegram::CONFIDENCE_LABEL.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Layer the TOML file and the environment, with `env` standing in for
    /// the process environment when given. A missing file leaves the
    /// defaults in place; an override that does not parse for its field is
    /// an error.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let lookup = |key: &str| match &env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };

        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                info!("Runner config {:?} not found, using defaults", path);
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(service::env::PREFIX)
                .prefix_separator("_")
                .separator(service::env::NESTING_SEPARATOR)
                .try_parsing(true)
                .source(env.clone()),
        );

        for (var, key) in service::env::ALIASES {
            builder = builder.set_override_option(*key, lookup(var))?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        debug!("Runner config after env overrides: {:?}", config.redacted());
        Ok(config)
    }

    /// Expand `$VAR` / `~` in configured paths
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.paths.thresholds = expand_path("paths.thresholds", &self.paths.thresholds)?;
        self.paths.weights = expand_path("paths.weights", &self.paths.weights)?;
        self.paths.state = expand_path("paths.state", &self.paths.state)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.market_data.candle_limit == 0 {
            return Err(ConfigError::invalid("market_data.candle_limit", "must be at least 1"));
        }

        if self.market_data.short_interval.trim().is_empty()
            || self.market_data.medium_interval.trim().is_empty()
        {
            return Err(ConfigError::invalid(
                "market_data.short_interval/medium_interval",
                "intervals cannot be empty",
            ));
        }

        if self.fetch.max_concurrent_pairs == 0 {
            return Err(ConfigError::invalid("fetch.max_concurrent_pairs", "must be at least 1"));
        }

        if self.indicators.rsi == 0 || self.indicators.bollinger == 0 || self.indicators.atr == 0 {
            return Err(ConfigError::invalid("indicators", "periods must be positive"));
        }

        Ok(())
    }

    /// Copy with the bot token masked, for logging
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.telegram.bot_token.is_some() {
            copy.telegram.bot_token = Some("***".to_string());
        }
        copy
    }
}

fn expand_path(field: &'static str, path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ConfigError::Expansion {
        field,
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}
