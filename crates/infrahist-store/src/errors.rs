//! Error handling for infrahist-store
//!
//! Wraps infrahist-core ExError with store-specific helpers

use infrahist_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an error for a failed git invocation
pub fn git_error(operation: &str, detail: &str) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op(operation.to_string())
        .with_message(format!("git failed: {}", detail.trim()))
}

/// Create an error for a snapshot file that cannot be decoded
pub fn invalid_snapshot(revision: &str, file: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("load_revision")
        .with_entity_id(revision)
        .with_message(format!("cannot decode {}: {}", file, reason))
}

/// Create a revision-not-found error
pub fn revision_not_found(revision: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("load_revision")
        .with_entity_id(revision)
        .with_message("revision not found")
}
