use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use types::EmittedSignal;

/// Persisted record of the most recent run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Signals emitted by the most recent successful run
    #[serde(default)]
    pub last_signals: Vec<EmittedSignal>,

    /// Carry-over fields this service does not own, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunState {
    /// Replace the previous run's signals, keeping carry-over fields
    pub fn with_signals(mut self, signals: Vec<EmittedSignal>) -> Self {
        self.last_signals = signals;
        self
    }
}
