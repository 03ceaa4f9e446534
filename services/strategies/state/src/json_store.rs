//! JSON file state store

use crate::{RunState, StateError, StateStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pretty-printed JSON record on local disk.
///
/// Writes go to a sibling `.tmp` file that is renamed over the target, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn load(&self) -> Result<RunState, StateError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No state file at {:?}, starting with an empty record", self.path);
                return Ok(RunState::default());
            }
            Err(source) => {
                return Err(StateError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(RunState::default());
        }

        let state: RunState =
            serde_json::from_str(&contents).map_err(|source| StateError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Loaded state from {:?}: {} previous signals, {} carry-over fields",
            self.path,
            state.last_signals.len(),
            state.extra.len()
        );
        Ok(state)
    }

    async fn save(&self, state: &RunState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state).map_err(StateError::Serialize)?;
        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, json)
            .await
            .map_err(|source| StateError::Write {
                path: temp_path.clone(),
                source,
            })?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|source| StateError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "Saved {} signals to {:?}",
            state.last_signals.len(),
            self.path
        );
        Ok(())
    }
}
