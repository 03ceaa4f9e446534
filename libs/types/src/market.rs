//! Market data primitives

use crate::common::errors::CandleError;
use serde::{Deserialize, Serialize};

/// One OHLCV bar as delivered by the candle source.
///
/// Series of candles are always ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time in milliseconds since the Unix epoch
    pub open_time_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(open_time_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check the bar is internally consistent
    pub fn validate(&self) -> Result<(), CandleError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ] {
            if !value.is_finite() {
                return Err(CandleError::NotFinite { field, value });
            }
        }

        if self.high < self.low {
            return Err(CandleError::InvertedRange {
                high: self.high,
                low: self.low,
            });
        }

        for (field, value) in [("open", self.open), ("close", self.close)] {
            if value < self.low || value > self.high {
                return Err(CandleError::OutsideRange {
                    field,
                    value,
                    low: self.low,
                    high: self.high,
                });
            }
        }

        if self.volume < 0.0 {
            return Err(CandleError::NegativeVolume { value: self.volume });
        }

        Ok(())
    }
}

/// Close prices of a candle series, oldest first
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
