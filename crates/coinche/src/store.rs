//! Persistence for the club state
//!
//! The file store writes to a sibling temp file and renames it over the
//! target, so a crash mid-write never leaves a half-written document.

use std::path::{Path, PathBuf};

use coinche_core::State;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load/save collaborator for the club state
pub trait Store {
    /// Load the saved state, or a fresh default one if nothing was saved yet
    fn load(&self) -> Result<State, StoreError>;

    /// Replace the saved state as a whole
    fn save(&mut self, state: &State) -> Result<(), StoreError>;
}

/// JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<State, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved state, starting fresh");
            return Ok(State::default());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, state: &State) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            warn!(path = %tmp.display(), "rename failed, removing temp file");
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

/// Keeps the last saved state in memory; used by tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: Option<State>,
    pub saves: usize,
}

impl Store for MemoryStore {
    fn load(&self) -> Result<State, StoreError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &State) -> Result<(), StoreError> {
        self.saved = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
