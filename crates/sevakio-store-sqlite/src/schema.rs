//! SQL schema for the Sevakio SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per registered identity. The primary key is the only
-- arbiter of \"already registered\"; rows are never updated or deleted.
CREATE TABLE IF NOT EXISTS profiles (
    subject_id    TEXT PRIMARY KEY NOT NULL,
    email         TEXT NOT NULL,
    full_name     TEXT NOT NULL,
    phone_number  TEXT,
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS profiles_created_idx ON profiles(created_at);

PRAGMA user_version = 1;
";
