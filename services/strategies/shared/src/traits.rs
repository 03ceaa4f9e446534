//! Strategy traits and interfaces

use async_trait::async_trait;
use thiserror::Error;
use types::{Candle, CandleError};

/// Source of historical OHLCV candles for a pair and interval
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Source name for identification in logs
    fn name(&self) -> &str;

    /// Fetch up to `limit` candles, oldest first.
    ///
    /// A successful result may hold fewer than `limit` candles, or none.
    async fn fetch_candles(
        &self,
        pair: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError>;
}

/// Candle retrieval failures
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for {pair} {interval} failed: {message}")]
    Transport {
        pair: String,
        interval: String,
        message: String,
    },

    #[error("Request for {pair} {interval} returned HTTP {status}: {body}")]
    Status {
        pair: String,
        interval: String,
        status: u16,
        body: String,
    },

    #[error("Malformed kline row {index} for {pair} {interval}: {message}")]
    Malformed {
        pair: String,
        interval: String,
        index: usize,
        message: String,
    },

    #[error("Invalid candle {index} for {pair} {interval}: {source}")]
    InvalidCandle {
        pair: String,
        interval: String,
        index: usize,
        #[source]
        source: CandleError,
    },
}

impl FetchError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Malformed { .. } | FetchError::InvalidCandle { .. } => false,
        }
    }

    pub fn pair(&self) -> &str {
        match self {
            FetchError::Transport { pair, .. }
            | FetchError::Status { pair, .. }
            | FetchError::Malformed { pair, .. }
            | FetchError::InvalidCandle { pair, .. } => pair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> FetchError {
        FetchError::Status {
            pair: "BTCUSDT".to_string(),
            interval: "5m".to_string(),
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_retryable_classification() {
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());

        let malformed = FetchError::Malformed {
            pair: "BTCUSDT".to_string(),
            interval: "5m".to_string(),
            index: 3,
            message: "expected array".to_string(),
        };
        assert!(!malformed.is_retryable());
        assert_eq!(malformed.pair(), "BTCUSDT");
    }

    #[test]
    fn test_error_message_names_request() {
        let message = status(418).to_string();
        assert!(message.contains("BTCUSDT 5m"));
        assert!(message.contains("418"));
    }
}
