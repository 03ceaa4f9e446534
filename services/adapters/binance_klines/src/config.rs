//! Configuration for the Binance kline client

use ::config::{FetchConfig, MarketDataConfig};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct BinanceClientConfig {
    /// REST root, without the `/api/v3` suffix
    pub base_url: String,
    pub timeout: Duration,
    /// Extra attempts after a retryable failure
    pub retry_attempts: u32,
    /// Delay before the first retry, doubled each further attempt
    pub retry_backoff: Duration,
}

impl BinanceClientConfig {
    pub fn from_runner(market_data: &MarketDataConfig, fetch: &FetchConfig) -> Self {
        Self {
            base_url: market_data.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(market_data.http_timeout_secs),
            retry_attempts: fetch.retry_attempts,
            retry_backoff: Duration::from_millis(fetch.retry_backoff_ms),
        }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.retry_backoff.saturating_mul(factor)
    }
}

impl Default for BinanceClientConfig {
    fn default() -> Self {
        Self::from_runner(&MarketDataConfig::default(), &FetchConfig::default())
    }
}
