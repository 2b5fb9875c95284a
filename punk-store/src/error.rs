//! Store error types.

use thiserror::Error;

/// Errors from persisting application state. Load paths do not error — they
/// fall back to defaults instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
