//! Error types for the multi-timeframe signal strategy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Market data error: {0}")]
    Fetch(#[from] strategy_shared::FetchError),

    #[error("State error: {0}")]
    State(#[from] state_store::StateError),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
