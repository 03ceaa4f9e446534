//! Evaluation results and emitted signals
//!
//! Serialized names mirror the persisted state record: an emitted signal is
//! `{pair, dir, conf, meta: {s5, s15}}` and each evaluation is
//! `{dir, score, last}`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
    Hold,
}

impl Direction {
    /// Buy or Sell; Hold never produces a signal
    pub fn is_actionable(self) -> bool {
        !matches!(self, Direction::Hold)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
            Direction::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aligned value per indicator family, taken at the latest candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastValues {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    /// Bollinger middle band; `None` when the band series had no value here
    #[serde(rename = "bbMid")]
    pub band_middle: Option<f64>,
    pub atr: f64,
}

/// Outcome of evaluating one timeframe of one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(rename = "dir")]
    pub direction: Direction,
    /// Confirmation score, zero for Hold
    pub score: f64,
    /// `None` when no indicator history was available
    pub last: Option<LastValues>,
}

impl EvaluationResult {
    /// Hold with zero score and no last values
    pub fn insufficient_data() -> Self {
        Self {
            direction: Direction::Hold,
            score: 0.0,
            last: None,
        }
    }

    /// Volatility range at the latest candle, if known
    pub fn last_atr(&self) -> Option<f64> {
        self.last.map(|l| l.atr)
    }
}

/// Both timeframe evaluations behind an emitted signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMeta {
    #[serde(rename = "s5")]
    pub short: EvaluationResult,
    #[serde(rename = "s15")]
    pub medium: EvaluationResult,
}

/// A signal that passed agreement and confidence gating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedSignal {
    pub pair: String,
    #[serde(rename = "dir")]
    pub direction: Direction,
    /// Confidence in [0, 1]
    #[serde(rename = "conf")]
    pub confidence: f64,
    pub meta: SignalMeta,
}
