use healthstat_core::LOAD_LOCK_STALE_SECS;
use rusqlite::{TransactionBehavior, params};

use super::{Storage, get_conn};
use crate::error::StorageError;

impl Storage {
    /// Take the load lock for `holder`, breaking a stale one first.
    ///
    /// Runs in an immediate transaction so two processes racing for the lock
    /// are serialized by SQLite's write lock.
    ///
    /// # Errors
    /// Returns error if the lock table cannot be read or written.
    pub fn try_lock_load(&self, holder: &str) -> Result<bool, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let stale = tx.execute(
            "DELETE FROM load_lock
             WHERE acquired_at < CAST(strftime('%s', 'now') AS INTEGER) - ?1",
            params![LOAD_LOCK_STALE_SECS],
        )?;
        if stale > 0 {
            tracing::warn!(stale_secs = LOAD_LOCK_STALE_SECS, "took over abandoned load lock");
        }
        let taken = tx.execute(
            "INSERT OR IGNORE INTO load_lock (id, holder, acquired_at)
             VALUES (1, ?1, CAST(strftime('%s', 'now') AS INTEGER))",
            params![holder],
        )?;
        tx.commit()?;
        Ok(taken == 1)
    }

    /// Release the load lock if `holder` owns it.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn unlock_load(&self, holder: &str) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let released =
            conn.execute("DELETE FROM load_lock WHERE id = 1 AND holder = ?1", params![holder])?;
        if released == 0 {
            tracing::warn!(holder, "load lock was not held by this loader");
        }
        Ok(())
    }
}
