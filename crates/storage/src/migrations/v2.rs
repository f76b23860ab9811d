//! Migration v2: single-row load lock

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS load_lock (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    holder TEXT NOT NULL,
    acquired_at INTEGER NOT NULL
);

PRAGMA user_version = 2;
";
