use rusqlite::params;

use super::{Storage, get_conn};
use crate::error::StorageError;
use crate::index::{Dialect, IndexStatus, OBSERVATION_INDEX};

impl Storage {
    /// Whether the composite index is present.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn index_exists(&self) -> Result<bool, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?1",
            params![OBSERVATION_INDEX.name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Create the composite index unless it already exists.
    ///
    /// # Errors
    /// Returns error if the store rejects the index definition.
    pub fn ensure_index(&self) -> Result<IndexStatus, StorageError> {
        if self.index_exists()? {
            tracing::debug!(index = OBSERVATION_INDEX.name, "index already present");
            return Ok(IndexStatus::AlreadyPresent);
        }
        let conn = get_conn(&self.pool)?;
        conn.execute_batch(&OBSERVATION_INDEX.create_sql(Dialect::Sqlite))?;
        tracing::info!(index = OBSERVATION_INDEX.name, "index created");
        Ok(IndexStatus::Created)
    }
}
