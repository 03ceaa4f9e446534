//! Technical indicators for signal generation
//!
//! Streaming calculators: each `update` consumes one input and returns a value
//! once the warm-up period is complete. `series` runs a whole input through a
//! fresh calculator, so an input shorter than the warm-up yields an empty
//! series. A period of zero never produces a value.

use std::collections::VecDeque;
use types::Candle;

/// Simple Moving Average calculator
#[derive(Debug, Clone)]
pub struct MovingAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl MovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
        }
    }

    /// Add a new value and return current MA
    pub fn update(&mut self, value: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }

        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.period {
            if let Some(old_value) = self.values.pop_front() {
                self.sum -= old_value;
            }
        }

        self.current()
    }

    /// Get current moving average without adding new value
    pub fn current(&self) -> Option<f64> {
        if self.is_ready() {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    /// Check if indicator is ready (has enough data points)
    pub fn is_ready(&self) -> bool {
        self.period > 0 && self.values.len() == self.period
    }
}

/// Exponential Moving Average, seeded with the SMA of the first `period` values
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    multiplier: f64,
    seed: MovingAverage,
    current: Option<f64>,
}

impl ExponentialMovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            multiplier: 2.0 / (period as f64 + 1.0),
            seed: MovingAverage::new(period),
            current: None,
        }
    }

    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.current = match self.current {
            Some(previous) => Some((value - previous) * self.multiplier + previous),
            None => self.seed.update(value),
        };
        self.current
    }

    pub fn series(period: usize, values: &[f64]) -> Vec<f64> {
        let mut ema = Self::new(period);
        values.iter().filter_map(|&v| ema.update(v)).collect()
    }
}

/// Wilder smoothing: SMA over the first `period` inputs, then
/// `avg = (prev * (period - 1) + x) / period`
#[derive(Debug, Clone)]
struct WilderAverage {
    period: usize,
    seed: MovingAverage,
    current: Option<f64>,
}

impl WilderAverage {
    fn new(period: usize) -> Self {
        Self {
            period,
            seed: MovingAverage::new(period),
            current: None,
        }
    }

    fn update(&mut self, value: f64) -> Option<f64> {
        self.current = match self.current {
            Some(previous) => {
                let period = self.period as f64;
                Some((previous * (period - 1.0) + value) / period)
            }
            None => self.seed.update(value),
        };
        self.current
    }
}

/// Relative Strength Index over price changes, bounded to [0, 100]
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    previous: Option<f64>,
    gains: WilderAverage,
    losses: WilderAverage,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Self {
        Self {
            previous: None,
            gains: WilderAverage::new(period),
            losses: WilderAverage::new(period),
        }
    }

    pub fn update(&mut self, value: f64) -> Option<f64> {
        let previous = self.previous.replace(value)?;
        let change = value - previous;

        let avg_gain = self.gains.update(change.max(0.0));
        let avg_loss = self.losses.update((-change).max(0.0));

        match (avg_gain, avg_loss) {
            (Some(_), Some(loss)) if loss == 0.0 => Some(100.0),
            (Some(gain), Some(_)) if gain == 0.0 => Some(0.0),
            (Some(gain), Some(loss)) => Some(100.0 - 100.0 / (1.0 + gain / loss)),
            _ => None,
        }
    }

    pub fn series(period: usize, values: &[f64]) -> Vec<f64> {
        let mut rsi = Self::new(period);
        values.iter().filter_map(|&v| rsi.update(v)).collect()
    }
}

/// One Bollinger band reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger bands: SMA middle, population standard deviation width
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
    values: VecDeque<f64>,
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            period,
            multiplier,
            values: VecDeque::with_capacity(period),
        }
    }

    pub fn update(&mut self, value: f64) -> Option<BandPoint> {
        if self.period == 0 {
            return None;
        }

        self.values.push_back(value);
        if self.values.len() > self.period {
            self.values.pop_front();
        }
        if self.values.len() < self.period {
            return None;
        }

        let count = self.values.len() as f64;
        let mean = self.values.iter().sum::<f64>() / count;
        let variance = self
            .values
            .iter()
            .map(|&x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f64>()
            / count;
        let width = variance.sqrt() * self.multiplier;

        Some(BandPoint {
            upper: mean + width,
            middle: mean,
            lower: mean - width,
        })
    }

    pub fn series(period: usize, multiplier: f64, values: &[f64]) -> Vec<BandPoint> {
        let mut bands = Self::new(period, multiplier);
        values.iter().filter_map(|&v| bands.update(v)).collect()
    }
}

/// Average True Range; the first candle only seeds the previous close
#[derive(Debug, Clone)]
pub struct AverageTrueRange {
    previous_close: Option<f64>,
    average: WilderAverage,
}

impl AverageTrueRange {
    pub fn new(period: usize) -> Self {
        Self {
            previous_close: None,
            average: WilderAverage::new(period),
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<f64> {
        let previous_close = self.previous_close.replace(close)?;
        let true_range = (high - low)
            .max((high - previous_close).abs())
            .max((low - previous_close).abs());
        self.average.update(true_range)
    }

    pub fn series(period: usize, candles: &[Candle]) -> Vec<f64> {
        let mut atr = Self::new(period);
        candles
            .iter()
            .filter_map(|c| atr.update(c.high, c.low, c.close))
            .collect()
    }
}
