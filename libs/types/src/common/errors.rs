//! Error types for candle validation
//!
//! Candles arrive from an external provider as loosely typed rows. These
//! errors describe the ways a parsed row can still be unusable.

use thiserror::Error;

/// Errors that can occur while validating a parsed candle
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CandleError {
    /// A price or volume field is NaN or infinite
    #[error("Field '{field}' is not finite: {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// High is below low
    #[error("High {high} is below low {low}")]
    InvertedRange { high: f64, low: f64 },

    /// Open or close lies outside the high/low range
    #[error("Field '{field}' = {value} lies outside [{low}, {high}]")]
    OutsideRange {
        field: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    /// Volume is negative
    #[error("Volume cannot be negative: {value}")]
    NegativeVolume { value: f64 },
}
