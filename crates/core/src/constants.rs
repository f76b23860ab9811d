//! Shared constants for healthstat.
//!
//! Centralizes limits and defaults used by more than one crate.

/// Name of the table holding observation records.
pub const OBSERVATIONS_TABLE: &str = "observations";

/// Name of the composite (disease, indicator, year) index.
pub const OBSERVATION_INDEX_NAME: &str = "idx_obs_disease_indicator_year";

/// Number of leading characters of `disease` and `indicator` covered by the index.
pub const INDEX_PREFIX_LEN: u32 = 100;

/// Default number of rows per insert batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Upper bound on rows per insert batch.
pub const MAX_BATCH_SIZE: usize = 5000;

/// Default number of rows returned by the HTTP observations endpoint.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Maximum number of rows any single HTTP lookup returns (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Connection pool: default maximum connections.
pub const DEFAULT_POOL_MAX_CONNECTIONS: u32 = 8;

/// Connection pool: default acquire timeout in seconds.
pub const DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Connection pool: idle timeout in seconds (PostgreSQL only).
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Age in seconds after which a load lock left by a crashed loader may be taken over.
pub const LOAD_LOCK_STALE_SECS: i64 = 6 * 60 * 60;
