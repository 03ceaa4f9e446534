//! Test fixtures

use config::{IndicatorWeights, RunnerConfig, Settings, ThresholdConfig, WeightConfig};
use std::path::Path;
use strategy_shared::{candles_from_closes, MockCandleSource};
use types::Candle;

pub const SHORT: &str = "5m";
pub const MEDIUM: &str = "15m";

/// Enough history for every default warm-up
pub const HISTORY: usize = 120;

/// Steadily rising closes; fast EMA above slow, RSI at 100
pub fn uptrend(len: usize) -> Vec<Candle> {
    trend(100.0, 1.0, len)
}

/// Steadily falling closes; fast EMA below slow, RSI at 0
pub fn downtrend(len: usize) -> Vec<Candle> {
    trend(500.0, -1.0, len)
}

pub fn trend(start: f64, step: f64, len: usize) -> Vec<Candle> {
    let closes: Vec<f64> = (0..len).map(|i| start + step * i as f64).collect();
    candles_from_closes(&closes, 1.0)
}

/// Thresholds and weights of a typical deployment; weights sum to 0.85
pub fn scenario_settings(pairs: &[&str]) -> Settings {
    Settings {
        thresholds: ThresholdConfig {
            pairs: pairs.iter().map(|p| p.to_string()).collect(),
            ema_fast: 9,
            ema_slow: 21,
            rsi_buy: 60.0,
            rsi_sell: 40.0,
            bb_mult: 2.0,
            atr_low_cut: 0.5,
            confidence_min: 0.6,
        },
        weights: WeightConfig {
            indicators: IndicatorWeights {
                ema: 0.35,
                rsi: 0.3,
                boll: 0.2,
            },
        },
        runner: RunnerConfig::default(),
    }
}

/// Source serving the same series on both timeframes
pub fn source_with(pairs: &[(&str, Vec<Candle>, Vec<Candle>)]) -> MockCandleSource {
    pairs
        .iter()
        .fold(MockCandleSource::new(), |source, (pair, short, medium)| {
            source
                .with_series(pair, SHORT, short.clone())
                .with_series(pair, MEDIUM, medium.clone())
        })
}

/// Write thresholds, weights and a runner TOML pointing at them into `dir`.
///
/// Returns the runner config path.
pub fn write_config_files(dir: &Path, settings: &Settings) -> std::io::Result<std::path::PathBuf> {
    let thresholds = dir.join("thresholds.json");
    let weights = dir.join("weights.json");
    let state = dir.join("state.json");
    let runner = dir.join("mtf_signals.toml");

    std::fs::write(&thresholds, to_json(&settings.thresholds)?)?;
    std::fs::write(&weights, to_json(&settings.weights)?)?;
    std::fs::write(
        &runner,
        format!(
            "[paths]\nthresholds = {:?}\nweights = {:?}\nstate = {:?}\n",
            thresholds, weights, state
        ),
    )?;
    Ok(runner)
}

fn to_json<T: serde::Serialize>(value: &T) -> std::io::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}
