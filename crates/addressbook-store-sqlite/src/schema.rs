//! SQL schema for the address book SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` is the auto-generated key; it doubles as the contact id when the
-- caller does not supply one, and fixes insertion order for listings.
CREATE TABLE IF NOT EXISTS contacts (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id  TEXT UNIQUE,
    first_name  TEXT NOT NULL,
    surname     TEXT,
    birthday    TEXT,            -- ISO 8601 calendar date or NULL
    phone       TEXT
);

PRAGMA user_version = 1;
";
