//! Storage layer for healthstat
//!
//! Observation rows live in SQLite (default) or PostgreSQL. Both backends
//! implement the same capability traits and share one index definition.

pub mod backend;
pub mod error;
pub mod index;
pub mod traits;

#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
pub mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use index::{Dialect, IndexDefinition, IndexStatus, OBSERVATION_INDEX};
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::{AggregateStore, IndexStore, LoadLockStore, ObservationStore};
