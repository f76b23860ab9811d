//! Migration v1: observations table

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS observations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    disease TEXT NOT NULL,
    indicator TEXT NOT NULL,
    year INTEGER NOT NULL,
    value REAL,
    region TEXT,
    unit TEXT
);

PRAGMA user_version = 1;
";
