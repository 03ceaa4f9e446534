//! Primary signal evaluation for a single timeframe

use crate::snapshot::IndicatorSnapshot;
use config::{ThresholdConfig, WeightConfig};
use types::{Direction, EvaluationResult, LastValues};

/// Evaluate one timeframe's snapshot.
///
/// A snapshot with any empty series evaluates to Hold with zero score and no
/// last values.
pub fn evaluate_primary(
    snapshot: &IndicatorSnapshot,
    thresholds: &ThresholdConfig,
    weights: &WeightConfig,
) -> EvaluationResult {
    let Some(last) = snapshot.last_aligned() else {
        return EvaluationResult::insufficient_data();
    };

    let direction = direction_for(&last, thresholds);
    let score = if direction.is_actionable() {
        weights.confirmation_score()
    } else {
        0.0
    };

    EvaluationResult {
        direction,
        score,
        last: Some(last),
    }
}

/// Directional rule at the aligned last index; ties are Hold
pub fn direction_for(last: &LastValues, thresholds: &ThresholdConfig) -> Direction {
    if last.band_middle.is_none() {
        return Direction::Hold;
    }

    if last.ema_fast > last.ema_slow && last.rsi > thresholds.rsi_buy {
        Direction::Buy
    } else if last.ema_fast < last.ema_slow && last.rsi < thresholds.rsi_sell {
        Direction::Sell
    } else {
        Direction::Hold
    }
}
