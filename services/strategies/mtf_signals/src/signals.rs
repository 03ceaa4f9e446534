//! Per-run signal statistics

use crate::aggregator::Decision;
use types::Direction;

/// Signal generation statistics for one run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SignalStats {
    pub pairs_evaluated: u64,
    pub pairs_skipped: u64,
    pub no_agreement: u64,
    pub below_minimum: u64,
    pub buy_signals: u64,
    pub sell_signals: u64,
    pub avg_confidence: f64,
}

impl SignalStats {
    pub fn total_signals(&self) -> u64 {
        self.buy_signals + self.sell_signals
    }

    /// Update stats with one pair's decision
    pub fn record_decision(&mut self, decision: &Decision) {
        self.pairs_evaluated += 1;

        match decision {
            Decision::NoAgreement { .. } => self.no_agreement += 1,
            Decision::BelowMinimum { .. } => self.below_minimum += 1,
            Decision::Emit { signal, .. } => {
                match signal.direction {
                    Direction::Buy => self.buy_signals += 1,
                    Direction::Sell => self.sell_signals += 1,
                    Direction::Hold => {}
                }

                // Rolling average over emitted signals
                let total = self.total_signals();
                if total > 0 {
                    let total_confidence =
                        self.avg_confidence * (total - 1) as f64 + signal.confidence;
                    self.avg_confidence = total_confidence / total as f64;
                }
            }
        }
    }

    pub fn record_skipped(&mut self) {
        self.pairs_skipped += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::QualityGates;
    use types::{EmittedSignal, EvaluationResult, SignalMeta};

    fn emit(direction: Direction, confidence: f64) -> Decision {
        Decision::Emit {
            signal: EmittedSignal {
                pair: "ABCUSDT".to_string(),
                direction,
                confidence,
                meta: SignalMeta {
                    short: EvaluationResult::insufficient_data(),
                    medium: EvaluationResult::insufficient_data(),
                },
            },
            gates: QualityGates {
                spread: true,
                volume: true,
                volatility: true,
            },
        }
    }

    #[test]
    fn test_signal_stats() {
        let mut stats = SignalStats::default();
        stats.record_decision(&emit(Direction::Buy, 0.8));
        stats.record_decision(&emit(Direction::Sell, 0.9));
        stats.record_decision(&Decision::NoAgreement {
            short: Direction::Buy,
            medium: Direction::Hold,
        });
        stats.record_skipped();

        assert_eq!(stats.pairs_evaluated, 3);
        assert_eq!(stats.pairs_skipped, 1);
        assert_eq!(stats.buy_signals, 1);
        assert_eq!(stats.sell_signals, 1);
        assert_eq!(stats.no_agreement, 1);
        assert_eq!(stats.total_signals(), 2);
        assert!((stats.avg_confidence - 0.85).abs() < 1e-12);
    }
}
