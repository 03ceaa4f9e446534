//! Multi-timeframe aggregation
//!
//! Combines the short and medium timeframe evaluations of one pair into an
//! emission decision: agreement, mean score, quality gates, confidence and
//! the minimum-confidence gate, in that order.

use config::{GateConfig, ThresholdConfig};
use serde::Serialize;
use types::{Direction, EmittedSignal, EvaluationResult, SignalMeta};

/// Named quality checks; a failing gate halves confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityGates {
    /// Not implemented; reported from configuration
    pub spread: bool,
    /// Not implemented; reported from configuration
    pub volume: bool,
    /// Short-timeframe ATR at or above the cutoff; fails when ATR is unknown
    pub volatility: bool,
}

impl QualityGates {
    pub fn evaluate(short: &EvaluationResult, gates: &GateConfig, atr_low_cut: f64) -> Self {
        Self {
            spread: gates.spread_ok,
            volume: gates.volume_ok,
            volatility: short.last_atr().is_some_and(|atr| atr >= atr_low_cut),
        }
    }

    pub fn all_pass(&self) -> bool {
        self.spread && self.volume && self.volatility
    }
}

/// Outcome of aggregating one pair
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Directions differ, or both are Hold
    NoAgreement {
        short: Direction,
        medium: Direction,
    },
    /// Agreement, but confidence under the configured minimum
    BelowMinimum {
        direction: Direction,
        confidence: f64,
        gates: QualityGates,
    },
    Emit {
        signal: EmittedSignal,
        gates: QualityGates,
    },
}

impl Decision {
    pub fn signal(&self) -> Option<&EmittedSignal> {
        match self {
            Decision::Emit { signal, .. } => Some(signal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MultiTimeframeAggregator<'a> {
    thresholds: &'a ThresholdConfig,
    gates: &'a GateConfig,
}

impl<'a> MultiTimeframeAggregator<'a> {
    pub fn new(thresholds: &'a ThresholdConfig, gates: &'a GateConfig) -> Self {
        Self { thresholds, gates }
    }

    pub fn aggregate(
        &self,
        pair: &str,
        short: &EvaluationResult,
        medium: &EvaluationResult,
    ) -> Decision {
        if short.direction != medium.direction || !short.direction.is_actionable() {
            return Decision::NoAgreement {
                short: short.direction,
                medium: medium.direction,
            };
        }

        let base = (short.score + medium.score) / 2.0;
        let gates = QualityGates::evaluate(short, self.gates, self.thresholds.atr_low_cut);
        let confidence = adjusted_confidence(base, &gates);

        if confidence < self.thresholds.confidence_min {
            return Decision::BelowMinimum {
                direction: short.direction,
                confidence,
                gates,
            };
        }

        Decision::Emit {
            signal: EmittedSignal {
                pair: pair.to_string(),
                direction: short.direction,
                confidence,
                meta: SignalMeta {
                    short: short.clone(),
                    medium: medium.clone(),
                },
            },
            gates,
        }
    }
}

/// Halve on any failing gate, then clamp to [0, 1]
pub fn adjusted_confidence(base: f64, gates: &QualityGates) -> f64 {
    let confidence = if gates.all_pass() { base } else { base * 0.5 };
    confidence.clamp(0.0, 1.0)
}
