use async_trait::async_trait;

use crate::error::StorageError;
use crate::index::IndexStatus;

/// Management of the composite observation index.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Create the composite index unless it already exists.
    async fn ensure_index(&self) -> Result<IndexStatus, StorageError>;

    /// Whether the composite index is present.
    async fn index_exists(&self) -> Result<bool, StorageError>;
}
