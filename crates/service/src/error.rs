//! Typed error enum for the service layer.
//!
//! Each failure the loader, query and stats paths can produce has its own
//! variant, so the transport adapter can map them to status codes without
//! downcasting.

use healthstat_core::FilterError;
use healthstat_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A query parameter could not be parsed.
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    /// Caller provided invalid input (blank required parameter).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No row matches the (disease, indicator) pair at all.
    #[error("no observations for disease {disease:?} and indicator {indicator:?}")]
    NotFound { disease: String, indicator: String },

    /// The store rejected the index definition.
    #[error("index creation failed: {0}")]
    IndexCreation(#[source] StorageError),

    /// A store failure aborted the load. Rows inserted before it stay visible.
    #[error(
        "load aborted after {processed} rows ({inserted} inserted, {skipped} skipped): {source}"
    )]
    Load {
        processed: u64,
        inserted: u64,
        skipped: u64,
        #[source]
        source: StorageError,
    },

    /// The dataset could not be opened or read, or lacks a required column.
    #[error("dataset: {0}")]
    Dataset(String),

    /// Another loader holds the store's load lock.
    #[error("a load is already in progress on this store")]
    LoadInProgress,

    /// Storage operation failed outside of a load.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether the underlying store timed out or could not be reached.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Storage(e) | Self::IndexCreation(e) | Self::Load { source: e, .. } => {
                e.is_unavailable()
            },
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller's input, not the system, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFilter(_) | Self::InvalidInput(_))
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Storage(StorageError::from(err))
    }
}
