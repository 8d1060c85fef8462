//! Error handling for helpdesk-store
//!
//! Wraps helpdesk-core HdError with store-specific helpers

use helpdesk_core::errors::{HdError, HdErrorKind};
use rusqlite::ffi;
use rusqlite::ErrorCode;
use std::path::Path;

/// Result type alias using HdError
pub type Result<T> = std::result::Result<T, HdError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> HdError {
    let reason = err.to_string();
    let kind = from_rusqlite(err).kind();
    HdError::new(kind)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> HdError {
    HdError::new(HdErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create an error for a pre-existing database whose tables are not understood
pub fn legacy_schema_error(detail: &str) -> HdError {
    HdError::new(HdErrorKind::StorageUnavailable)
        .with_op("legacy_import")
        .with_message(format!("Unrecognized legacy schema: {}", detail))
}

/// Create an error for a database file that cannot be opened
pub fn storage_unavailable(path: &Path, err: rusqlite::Error) -> HdError {
    HdError::new(HdErrorKind::StorageUnavailable)
        .with_op("open")
        .with_entity_id(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a database error from rusqlite::Error
///
/// Constraint failures are told apart by SQLite's extended result code so
/// callers can match on the kind instead of the message.
pub fn from_rusqlite(err: rusqlite::Error) -> HdError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => classify(failure),
        rusqlite::Error::QueryReturnedNoRows => HdErrorKind::NotFound,
        _ => HdErrorKind::Persistence,
    };

    HdError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

fn classify(failure: &ffi::Error) -> HdErrorKind {
    match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            HdErrorKind::UniqueConstraintViolation
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => HdErrorKind::ForeignKeyViolation,
        _ => match failure.code {
            ErrorCode::ConstraintViolation => HdErrorKind::ConstraintViolation,
            ErrorCode::CannotOpen
            | ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::NotADatabase
            | ErrorCode::DiskFull => HdErrorKind::StorageUnavailable,
            _ => HdErrorKind::Persistence,
        },
    }
}
