//! Shared Strategy Framework
//!
//! Common seams and utilities for signal strategy implementations: the
//! candle source trait, logging setup, run counters and test doubles.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod testing;
pub mod traits;

pub use config::*;
pub use logging::{init_strategy_logging, LogEmoji};
pub use metrics::*;
pub use testing::*;
pub use traits::*;
