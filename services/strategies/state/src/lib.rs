//! # Run State Persistence
//!
//! The only state that survives between runs: the list of signals the most
//! recent run emitted, plus whatever unrelated top-level fields the record
//! already carried.
//!
//! The record is read once at startup and written once at the end of a
//! successful run. Each write replaces `last_signals` wholesale; nothing
//! accumulates across runs.

pub mod json_store;
pub mod memory;
pub mod run_state;
pub mod traits;

pub use json_store::JsonFileStateStore;
pub use memory::InMemoryStateStore;
pub use run_state::RunState;
pub use traits::{StateError, StateStore};
