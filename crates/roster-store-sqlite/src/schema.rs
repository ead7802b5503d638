//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS departments (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE CHECK (length(name) BETWEEN 1 AND 100)
);

-- department_id is not a foreign key: people may reference a department
-- that does not exist, and reads resolve it with a LEFT JOIN.
-- AUTOINCREMENT keeps ids of deleted people from being reused.
CREATE TABLE IF NOT EXISTS people (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name     TEXT    NOT NULL CHECK (length(first_name) <= 50),
    last_name      TEXT    NOT NULL CHECK (length(last_name) <= 50),
    date_of_birth  TEXT    NOT NULL,   -- YYYY-MM-DD
    department_id  INTEGER NOT NULL,
    email          TEXT    NOT NULL UNIQUE CHECK (length(email) <= 100)
);

CREATE INDEX IF NOT EXISTS people_last_name_idx  ON people(last_name COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS people_department_idx ON people(department_id);

PRAGMA user_version = 1;
";
