//! # punk-store
//!
//! Persisted application state with explicit `load`/`save`.
//!
//! The chat core stays pure; everything that survives a restart — active
//! provider, per-provider connection settings, the system prompt, the saved
//! prompt list, and the theme preference — lives in [`AppState`] and moves
//! through a [`Store`]. The default backend is a single JSON document on
//! disk ([`JsonFileStore`]).
//!
//! Malformed or missing persisted state is never an error the user sees: it
//! is logged and replaced with defaults.

pub mod error;
pub mod state;

pub use error::StoreError;
pub use state::AppState;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Load/save seam for application state.
pub trait Store {
    /// Loads the persisted state, falling back to defaults when there is
    /// nothing usable to load.
    fn load(&self) -> AppState;

    /// Persists the state.
    fn save(&self, state: &AppState) -> Result<(), StoreError>;
}

/// JSON-document store: one pretty-printed file at a fixed path.
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
}

impl Store for JsonFileStore {
    fn load(&self) -> AppState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no state file; using defaults");
                return AppState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed state file; using defaults");
                AppState::default()
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
