//! # Binance Kline Adapter
//!
//! Fetches historical OHLCV candles from the Binance spot REST API
//! (`GET /api/v3/klines`) and exposes them through the strategy
//! [`CandleSource`](strategy_shared::CandleSource) seam.
//!
//! Rows are validated before they leave the adapter: a malformed row or an
//! inconsistent bar fails the whole fetch rather than being dropped.

pub mod client;
pub mod config;
pub mod parser;

pub use crate::client::BinanceKlineClient;
pub use crate::config::BinanceClientConfig;
pub use crate::parser::parse_klines;
