//! # Multi-Timeframe Signals Strategy
//!
//! ## Purpose
//!
//! Single-pass signal generation over polled candles. For each configured pair
//! the strategy evaluates a short and a medium timeframe independently and
//! emits a directional signal only when both agree and the resulting
//! confidence clears the configured minimum.
//!
//! ## Architecture Role
//!
//! ```text
//! CandleSource → [Snapshot Builder] → [Primary Evaluator] → [Aggregator] → MessageSink
//!   5m / 15m       EMA, RSI, bands,     Buy / Sell / Hold     agreement,     StateStore
//!   candles        ATR per timeframe    plus weight score     gates, conf
//! ```
//!
//! ## Strategy Components
//!
//! - [`indicators`]: streaming EMA, RSI, Bollinger and ATR calculators
//! - [`snapshot`]: runs every family over a candle series and tail-aligns
//!   the results
//! - [`evaluator`]: directional rule and confirmation score for one timeframe
//! - [`aggregator`]: agreement check, quality gates and confidence
//! - [`strategy`]: the run itself, generic over candle source, sink and store
//!
//! Evaluation is a pure function of candles and configuration; identical
//! inputs always produce identical decisions.

pub mod aggregator;
pub mod error;
pub mod evaluator;
pub mod indicators;
pub mod signals;
pub mod snapshot;
pub mod strategy;

pub use aggregator::{adjusted_confidence, Decision, MultiTimeframeAggregator, QualityGates};
pub use error::{Result, StrategyError};
pub use evaluator::{direction_for, evaluate_primary};
pub use signals::SignalStats;
pub use snapshot::{IndicatorParams, IndicatorSnapshot};
pub use strategy::{PairEvaluation, RunReport, SignalRunner};
