//! In-memory state store for tests

use crate::{RunState, StateError, StateStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    state: Mutex<RunState>,
    saves: AtomicUsize,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RunState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current record
    pub fn snapshot(&self) -> RunState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self) -> Result<RunState, StateError> {
        Ok(self.snapshot())
    }

    async fn save(&self, state: &RunState) -> Result<(), StateError> {
        if let Ok(mut guard) = self.state.lock() {
            *guard = state.clone();
        }
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
