//! State store trait and errors

use crate::RunState;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to read state {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed state record in {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A single overwritable run-state record
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the record; a store with nothing saved yet yields an empty record
    async fn load(&self) -> Result<RunState, StateError>;

    /// Overwrite the record
    async fn save(&self, state: &RunState) -> Result<(), StateError>;
}
