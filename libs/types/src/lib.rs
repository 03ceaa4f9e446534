//! # Signal Service Types
//!
//! Domain types shared by every crate in the workspace: raw market candles,
//! per-timeframe evaluation results and the signals a run emits.
//!
//! ## Design Philosophy
//!
//! - **Plain Values**: Every type is an immutable value created once and passed
//!   by reference; nothing here owns I/O or global state
//! - **Stable Wire Shape**: Serialized field names match the persisted state
//!   record (`dir`, `conf`, `meta.s5`, `meta.s15`) so older state files load
//! - **Explicit Absence**: Insufficient indicator history is an `Option`, never
//!   a sentinel number
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Candle, Direction, EvaluationResult};
//!
//! let candle = Candle::new(1_700_000_000_000, 100.0, 101.5, 99.5, 101.0, 12.5);
//! assert!(candle.validate().is_ok());
//!
//! let hold = EvaluationResult::insufficient_data();
//! assert_eq!(hold.direction, Direction::Hold);
//! assert!(hold.last.is_none());
//! ```

pub mod common;
pub mod market;
pub mod signal;

pub use common::errors::CandleError;
pub use market::{closes, Candle};
pub use signal::{Direction, EmittedSignal, EvaluationResult, LastValues, SignalMeta};
