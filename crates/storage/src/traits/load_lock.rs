use async_trait::async_trait;

use crate::error::StorageError;

/// Store-wide exclusion between loads, shared by every process using the store.
///
/// The lock lives in the store itself, so two loader processes pointed at the
/// same database see each other. A lock older than
/// [`LOAD_LOCK_STALE_SECS`](healthstat_core::LOAD_LOCK_STALE_SECS) is treated
/// as abandoned and may be taken over.
#[async_trait]
pub trait LoadLockStore: Send + Sync {
    /// Take the load lock for `holder`. `Ok(false)` when someone else holds it.
    async fn try_lock_load(&self, holder: &str) -> Result<bool, StorageError>;

    /// Release the load lock if `holder` owns it.
    async fn unlock_load(&self, holder: &str) -> Result<(), StorageError>;
}
