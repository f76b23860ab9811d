//! PostgreSQL schema setup for healthstat storage.

use sqlx::PgPool;

/// Create the observations and load lock tables if they do not exist.
///
/// The composite lookup index is created separately by `ensure_index`.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS observations (
            id BIGSERIAL PRIMARY KEY,
            disease TEXT NOT NULL,
            indicator TEXT NOT NULL,
            year INTEGER NOT NULL,
            value DOUBLE PRECISION,
            region TEXT,
            unit TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS load_lock (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            holder TEXT NOT NULL,
            acquired_at BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
