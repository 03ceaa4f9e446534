//! Indicator snapshot builder
//!
//! Runs every indicator family over one candle series. Each family keeps its
//! own warm-up, so the series in a snapshot generally differ in length; the
//! newest value of every series always belongs to the newest candle.

use crate::indicators::{
    AverageTrueRange, BandPoint, BollingerBands, ExponentialMovingAverage, RelativeStrengthIndex,
};
use config::{IndicatorPeriods, ThresholdConfig};
use types::{closes, Candle, LastValues};

/// Periods and multipliers for one snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_mult: f64,
    pub atr_period: usize,
}

impl IndicatorParams {
    pub fn new(thresholds: &ThresholdConfig, periods: &IndicatorPeriods) -> Self {
        Self {
            ema_fast: thresholds.ema_fast,
            ema_slow: thresholds.ema_slow,
            rsi_period: periods.rsi,
            bollinger_period: periods.bollinger,
            bollinger_mult: thresholds.bb_mult,
            atr_period: periods.atr,
        }
    }

    /// Candles needed before every series has at least one value
    pub fn warm_up(&self) -> usize {
        [
            self.ema_fast,
            self.ema_slow,
            self.rsi_period + 1,
            self.bollinger_period,
            self.atr_period + 1,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub rsi: Vec<f64>,
    pub bands: Vec<BandPoint>,
    pub atr: Vec<f64>,
}

impl IndicatorSnapshot {
    /// Compute every series from `candles`, oldest first
    pub fn build(candles: &[Candle], params: &IndicatorParams) -> Self {
        let closes = closes(candles);
        Self {
            ema_fast: ExponentialMovingAverage::series(params.ema_fast, &closes),
            ema_slow: ExponentialMovingAverage::series(params.ema_slow, &closes),
            rsi: RelativeStrengthIndex::series(params.rsi_period, &closes),
            bands: BollingerBands::series(params.bollinger_period, params.bollinger_mult, &closes),
            atr: AverageTrueRange::series(params.atr_period, candles),
        }
    }

    /// Length every series can be cut to by dropping its oldest values
    pub fn common_len(&self) -> usize {
        [
            self.ema_fast.len(),
            self.ema_slow.len(),
            self.rsi.len(),
            self.bands.len(),
            self.atr.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or_default()
    }

    /// Values at aligned index `common_len - 1`, or `None` when any series is
    /// empty
    pub fn last_aligned(&self) -> Option<LastValues> {
        let n = self.common_len();
        if n == 0 {
            return None;
        }

        Some(LastValues {
            ema_fast: *aligned(&self.ema_fast, n)?.last()?,
            ema_slow: *aligned(&self.ema_slow, n)?.last()?,
            rsi: *aligned(&self.rsi, n)?.last()?,
            band_middle: aligned(&self.bands, n)?.last().map(|b| b.middle),
            atr: *aligned(&self.atr, n)?.last()?,
        })
    }
}

/// The newest `n` values of `series`
fn aligned<T>(series: &[T], n: usize) -> Option<&[T]> {
    series.get(series.len().checked_sub(n)?..)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strategy_shared::candles_from_closes;

    fn params() -> IndicatorParams {
        IndicatorParams {
            ema_fast: 3,
            ema_slow: 5,
            rsi_period: 4,
            bollinger_period: 6,
            bollinger_mult: 2.0,
            atr_period: 4,
        }
    }

    #[test]
    fn test_series_lengths() {
        let candles = candles_from_closes(&(1..=20).map(f64::from).collect::<Vec<_>>(), 1.0);
        let snapshot = IndicatorSnapshot::build(&candles, &params());

        assert_eq!(snapshot.ema_fast.len(), 18);
        assert_eq!(snapshot.ema_slow.len(), 16);
        assert_eq!(snapshot.rsi.len(), 16);
        assert_eq!(snapshot.bands.len(), 15);
        assert_eq!(snapshot.atr.len(), 16);
        assert_eq!(snapshot.common_len(), 15);
    }

    #[test]
    fn test_last_aligned_takes_newest_values() {
        let snapshot = IndicatorSnapshot {
            ema_fast: vec![1.0, 2.0, 3.0],
            ema_slow: vec![10.0, 20.0],
            rsi: vec![40.0, 50.0, 60.0, 70.0],
            bands: vec![BandPoint {
                upper: 9.0,
                middle: 8.0,
                lower: 7.0,
            }],
            atr: vec![0.1, 0.2],
        };

        assert_eq!(snapshot.common_len(), 1);
        assert_eq!(
            snapshot.last_aligned(),
            Some(LastValues {
                ema_fast: 3.0,
                ema_slow: 20.0,
                rsi: 70.0,
                band_middle: Some(8.0),
                atr: 0.2,
            })
        );
    }

    #[test]
    fn test_short_series_has_no_last_values() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0], 1.0);
        let snapshot = IndicatorSnapshot::build(&candles, &params());

        assert!(snapshot.ema_slow.is_empty());
        assert_eq!(snapshot.common_len(), 0);
        assert_eq!(snapshot.last_aligned(), None);
    }

    #[test]
    fn test_warm_up() {
        assert_eq!(params().warm_up(), 6);
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1.0);
        assert_eq!(IndicatorSnapshot::build(&candles, &params()).common_len(), 1);
    }

    proptest! {
        #[test]
        fn prop_alignment_uses_min_length(
            lens in proptest::collection::vec(0usize..40, 5),
            seed in 0.0f64..100.0,
        ) {
            let series = |len: usize, offset: f64| -> Vec<f64> {
                (0..len).map(|i| seed + offset + i as f64).collect()
            };
            let snapshot = IndicatorSnapshot {
                ema_fast: series(lens[0], 0.0),
                ema_slow: series(lens[1], 1.0),
                rsi: series(lens[2], 2.0),
                bands: series(lens[3], 3.0)
                    .into_iter()
                    .map(|m| BandPoint { upper: m + 1.0, middle: m, lower: m - 1.0 })
                    .collect(),
                atr: series(lens[4], 4.0),
            };

            let n = *lens.iter().min().unwrap();
            prop_assert_eq!(snapshot.common_len(), n);

            match snapshot.last_aligned() {
                None => prop_assert_eq!(n, 0),
                Some(last) => {
                    prop_assert!(n > 0);
                    prop_assert_eq!(last.ema_fast, *snapshot.ema_fast.last().unwrap());
                    prop_assert_eq!(last.ema_slow, *snapshot.ema_slow.last().unwrap());
                    prop_assert_eq!(last.rsi, *snapshot.rsi.last().unwrap());
                    prop_assert_eq!(last.band_middle, snapshot.bands.last().map(|b| b.middle));
                    prop_assert_eq!(last.atr, *snapshot.atr.last().unwrap());
                }
            }
        }
    }
}
