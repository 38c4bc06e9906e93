//! `config`: read and write persisted defaults.

use std::time::Instant;

use infrahist_core::errors::Result;
use infrahist_core::{log_op_end, log_op_error, log_op_start};
use infrahist_store::SqliteDefaults;

/// Read a default
pub fn config_get(defaults: &SqliteDefaults, key: &str) -> Result<Option<String>> {
    defaults.get(key)
}

/// Persist a default, replacing any previous value
pub fn config_set(defaults: &SqliteDefaults, key: &str, value: &str) -> Result<()> {
    let start = Instant::now();
    log_op_start!("config_set", key = key);

    match defaults.set(key, value) {
        Ok(()) => {
            log_op_end!(
                "config_set",
                duration_ms = start.elapsed().as_millis() as u64,
                key = key
            );
            Ok(())
        }
        Err(e) => {
            log_op_error!(
                "config_set",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// Remove a default; returns whether it was set
pub fn config_unset(defaults: &SqliteDefaults, key: &str) -> Result<bool> {
    let start = Instant::now();
    log_op_start!("config_unset", key = key);

    match defaults.unset(key) {
        Ok(removed) => {
            log_op_end!(
                "config_unset",
                duration_ms = start.elapsed().as_millis() as u64,
                removed = removed
            );
            Ok(removed)
        }
        Err(e) => {
            log_op_error!(
                "config_unset",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}
