//! LoadLockStore implementation for PgStorage.

use super::*;

use crate::traits::LoadLockStore;
use async_trait::async_trait;
use healthstat_core::LOAD_LOCK_STALE_SECS;

#[async_trait]
impl LoadLockStore for PgStorage {
    async fn try_lock_load(&self, holder: &str) -> Result<bool, StorageError> {
        let mut tx = self.pool.begin().await?;
        let stale = sqlx::query(
            "DELETE FROM load_lock
             WHERE acquired_at < extract(epoch FROM now())::bigint - $1",
        )
        .bind(LOAD_LOCK_STALE_SECS)
        .execute(&mut *tx)
        .await?;
        if stale.rows_affected() > 0 {
            tracing::warn!(stale_secs = LOAD_LOCK_STALE_SECS, "took over abandoned load lock");
        }
        let taken = sqlx::query(
            "INSERT INTO load_lock (id, holder, acquired_at)
             VALUES (1, $1, extract(epoch FROM now())::bigint)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(holder)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(taken.rows_affected() == 1)
    }

    async fn unlock_load(&self, holder: &str) -> Result<(), StorageError> {
        let released = sqlx::query("DELETE FROM load_lock WHERE id = 1 AND holder = $1")
            .bind(holder)
            .execute(&self.pool)
            .await?;
        if released.rows_affected() == 0 {
            tracing::warn!(holder, "load lock was not held by this loader");
        }
        Ok(())
    }
}
