//! SQL schema for the Mermelada SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS contacts (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    email          TEXT,
    phone          TEXT,
    company        TEXT,
    next_follow_up TEXT,             -- 'YYYY-MM-DD' or NULL; informational only
    notes          TEXT,
    created_at     TEXT NOT NULL     -- RFC 3339 UTC; server-assigned
);

-- Append-only: no UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS product_interests (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id     INTEGER NOT NULL REFERENCES contacts(id),
    product_name   TEXT NOT NULL,    -- denormalized; not a catalog reference
    interest_level TEXT,             -- 'Low' | 'Medium' | 'High' or NULL
    notes          TEXT,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS follow_ups (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id INTEGER NOT NULL REFERENCES contacts(id),
    due_date   TEXT NOT NULL,        -- 'YYYY-MM-DD'; date-only precision
    completed  INTEGER NOT NULL DEFAULT 0,
    notes      TEXT
);

-- Static reference data, seeded once when empty.
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT,
    category    TEXT
);

CREATE INDEX IF NOT EXISTS interests_contact_idx ON product_interests(contact_id);
CREATE INDEX IF NOT EXISTS follow_ups_due_idx    ON follow_ups(due_date, completed);

PRAGMA user_version = 1;
";
