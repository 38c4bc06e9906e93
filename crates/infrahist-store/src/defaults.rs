//! Persisted defaults (key/value) backed by SQLite
//!
//! The `region` key anchors every history diff at its root resource.

use crate::db;
use crate::errors::{from_rusqlite, Result};
use infrahist_core::errors::{ExError, ExErrorKind};
use infrahist_core::RegionSource;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// Key holding the default region
pub const KEY_REGION: &str = "region";

/// Read a default, `None` when unset
pub fn get_default(conn: &Connection, key: &str) -> Result<Option<String>> {
    validate_key(key, "get_default")?;
    conn.query_row(
        "SELECT value FROM defaults WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
    .map_err(from_rusqlite)
}

/// Insert or replace a default
pub fn set_default(conn: &Connection, key: &str, value: &str) -> Result<()> {
    validate_key(key, "set_default")?;
    if value.trim().is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("set_default")
            .with_entity_id(key)
            .with_message("value must not be empty"));
    }

    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO defaults (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now],
    )
    .map_err(from_rusqlite)?;
    debug!(key, "default set");
    Ok(())
}

/// Remove a default; returns whether it was set
pub fn unset_default(conn: &Connection, key: &str) -> Result<bool> {
    validate_key(key, "unset_default")?;
    let removed = conn
        .execute("DELETE FROM defaults WHERE key = ?1", [key])
        .map_err(from_rusqlite)?;
    Ok(removed > 0)
}

fn validate_key(key: &str, op: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op(op.to_string())
            .with_message("key must not be empty"));
    }
    Ok(())
}

/// Defaults database handle
pub struct SqliteDefaults {
    conn: Connection,
}

impl SqliteDefaults {
    /// Open (creating and migrating as needed) the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: db::open_migrated(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        crate::migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        get_default(&self.conn, key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        set_default(&self.conn, key, value)
    }

    pub fn unset(&self, key: &str) -> Result<bool> {
        unset_default(&self.conn, key)
    }
}

impl RegionSource for SqliteDefaults {
    fn default_region(&self) -> Result<Option<String>> {
        self.get(KEY_REGION)
    }
}
