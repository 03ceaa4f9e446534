//! End-to-End Test Framework
//!
//! Fixtures for whole-run scenarios: candle series with a known trend,
//! settings that mirror a deployed configuration, and helpers that write
//! those settings to disk the way an operator would.

pub mod fixtures;

pub use fixtures::*;
