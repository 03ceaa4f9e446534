//! Binance REST kline client

use crate::config::BinanceClientConfig;
use crate::parser::parse_klines;
use async_trait::async_trait;
use strategy_shared::{CandleSource, FetchError};
use tracing::{debug, warn};
use types::Candle;

const KLINES_PATH: &str = "/api/v3/klines";
const BODY_EXCERPT_CHARS: usize = 200;

/// Candle source backed by `GET /api/v3/klines`
#[derive(Debug, Clone)]
pub struct BinanceKlineClient {
    client: reqwest::Client,
    config: BinanceClientConfig,
}

impl BinanceKlineClient {
    pub fn new(config: BinanceClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BinanceClientConfig {
        &self.config
    }

    fn klines_url(&self) -> String {
        format!("{}{}", self.config.base_url, KLINES_PATH)
    }

    /// One request, no retry
    async fn fetch_once(
        &self,
        pair: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            pair: pair.to_string(),
            interval: interval.to_string(),
            message: e.to_string(),
        };

        let limit = limit.to_string();
        let response = self
            .client
            .get(self.klines_url())
            .query(&[("symbol", pair), ("interval", interval), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                pair: pair.to_string(),
                interval: interval.to_string(),
                status: status.as_u16(),
                body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
                pair: pair.to_string(),
                interval: interval.to_string(),
                index: 0,
                message: format!("response is not JSON: {}", e),
            })?;

        parse_klines(pair, interval, &value)
    }
}

#[async_trait]
impl CandleSource for BinanceKlineClient {
    fn name(&self) -> &str {
        "binance"
    }

    async fn fetch_candles(
        &self,
        pair: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(pair, interval, limit).await {
                Ok(candles) => {
                    debug!(
                        "Fetched {} {} candles for {} (attempt {})",
                        candles.len(),
                        interval,
                        pair,
                        attempt + 1
                    );
                    return Ok(candles);
                }
                Err(e) if e.is_retryable() && attempt < self.config.retry_attempts => {
                    attempt += 1;
                    let delay = self.config.backoff_for(attempt);
                    warn!(
                        "Candle fetch failed (attempt {}), retrying in {:?}: {}",
                        attempt, delay, e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
