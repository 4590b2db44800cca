//! Error types for the catalog crate.
//!
//! Every failure here is fatal to the *current* operation only: callers
//! surface it to the user and may retry once the store is fixed.

use std::path::PathBuf;
use thiserror::Error;

/// Hint shown to the user whenever the store does not look like a movie catalog.
pub const SCHEMA_HINT: &str =
    "Check table/column names and ensure the database matches the expected schema.";

/// Errors that can occur while reading from the movie catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The store file is missing, unreadable, or not a database at all
    #[error("Catalog store unavailable at '{}': {reason}", .path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// Expected tables or columns are absent
    #[error("Catalog schema mismatch: {detail}")]
    SchemaMismatch { detail: String },

    /// Any other SQLite failure while running a read query
    #[error("Catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl CatalogError {
    /// Diagnostic hint to print alongside the error, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CatalogError::SchemaMismatch { .. } => Some(SCHEMA_HINT),
            _ => None,
        }
    }

    /// Reclassify a raw SQLite error raised while talking to the store at `path`.
    ///
    /// SQLite reports a missing table/column as a generic prepare failure, so
    /// the message text is the only thing that distinguishes it.
    pub(crate) fn from_sqlite(path: &std::path::Path, err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match &err {
            rusqlite::Error::SqliteFailure(code, _)
                if matches!(
                    code.code,
                    ErrorCode::NotADatabase
                        | ErrorCode::CannotOpen
                        | ErrorCode::PermissionDenied
                        | ErrorCode::DatabaseCorrupt
                ) =>
            {
                CatalogError::StoreUnavailable {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                }
            }
            rusqlite::Error::SqliteFailure(_, Some(msg))
                if msg.starts_with("no such table") || msg.starts_with("no such column") =>
            {
                CatalogError::SchemaMismatch { detail: msg.clone() }
            }
            _ => CatalogError::Query(err),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
