//! SQL for the settings table. Identical on SQLite and libsql.

/// One row per setting; `key` is unique so writes can use `INSERT OR REPLACE`.
pub const CONFIG_INIT: &str =
    "CREATE TABLE IF NOT EXISTS config (key TEXT PRIMARY KEY UNIQUE, value TEXT)";

pub const SELECT_ALL: &str = "SELECT key, value FROM config";

pub const UPSERT: &str = "INSERT OR REPLACE INTO config (key, value) VALUES (?, ?)";
