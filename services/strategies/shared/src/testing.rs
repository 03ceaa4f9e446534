//! Testing utilities for strategies

use crate::{CandleSource, FetchError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use types::Candle;

/// Scripted candle source.
///
/// Series are keyed by `(pair, interval)`; unknown keys return an empty
/// series. Pairs marked failing return a transport error on every interval.
#[derive(Debug, Default)]
pub struct MockCandleSource {
    series: HashMap<(String, String), Vec<Candle>>,
    failing_pairs: HashSet<String>,
    calls: AtomicUsize,
    requested: Mutex<Vec<(String, String, usize)>>,
}

impl MockCandleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, pair: &str, interval: &str, candles: Vec<Candle>) -> Self {
        self.series
            .insert((pair.to_string(), interval.to_string()), candles);
        self
    }

    pub fn with_failing_pair(mut self, pair: &str) -> Self {
        self.failing_pairs.insert(pair.to_string());
        self
    }

    /// Number of fetches attempted
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Every `(pair, interval, limit)` requested so far
    pub fn requests(&self) -> Vec<(String, String, usize)> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CandleSource for MockCandleSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_candles(
        &self,
        pair: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push((pair.to_string(), interval.to_string(), limit));
        }

        if self.failing_pairs.contains(pair) {
            return Err(FetchError::Transport {
                pair: pair.to_string(),
                interval: interval.to_string(),
                message: "simulated outage".to_string(),
            });
        }

        let candles = self
            .series
            .get(&(pair.to_string(), interval.to_string()))
            .cloned()
            .unwrap_or_default();
        let skip = candles.len().saturating_sub(limit);
        Ok(candles.into_iter().skip(skip).collect())
    }
}

/// Candle series built from close prices.
///
/// Each bar opens at the previous close and spans `range` around the
/// larger of open and close, so ATR stays near `range`.
pub fn candles_from_closes(closes: &[f64], range: f64) -> Vec<Candle> {
    let mut previous = closes.first().copied().unwrap_or_default();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = previous;
            previous = close;
            let high = open.max(close) + range / 2.0;
            let low = open.min(close) - range / 2.0;
            Candle::new(i as i64 * 60_000, open, high, low, close, 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_tail_and_records_requests() {
        let source = MockCandleSource::new().with_series(
            "BTCUSDT",
            "5m",
            candles_from_closes(&[1.0, 2.0, 3.0, 4.0], 0.5),
        );

        let candles = source.fetch_candles("BTCUSDT", "5m", 2).await.unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, 4.0);

        let empty = source.fetch_candles("BTCUSDT", "15m", 200).await.unwrap();
        assert!(empty.is_empty());

        assert_eq!(source.call_count(), 2);
        assert_eq!(
            source.requests()[0],
            ("BTCUSDT".to_string(), "5m".to_string(), 2)
        );
    }

    #[tokio::test]
    async fn test_failing_pair() {
        let source = MockCandleSource::new().with_failing_pair("ETHUSDT");
        let err = source.fetch_candles("ETHUSDT", "5m", 10).await.unwrap_err();
        assert_eq!(err.pair(), "ETHUSDT");
    }

    #[test]
    fn test_generated_candles_are_valid() {
        for candle in candles_from_closes(&[10.0, 11.0, 9.5, 12.0], 1.0) {
            assert!(candle.validate().is_ok());
        }
    }
}
