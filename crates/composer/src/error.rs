//! Error and warning types for the composer crate.
//!
//! Two very different kinds of failure live here:
//! - [`ComposeError`] aborts the current operation (bad filter state or a
//!   catalog failure)
//! - [`TokenWarning`] is recovered locally: the offending token is dropped
//!   and the rest of the batch is still used

use catalog::CatalogError;
use thiserror::Error;

/// Errors that abort composing or running a filter
#[derive(Error, Debug)]
pub enum ComposeError {
    /// The rating floor is not a finite number
    #[error("Invalid minimum rating: {0}")]
    InvalidRating(f64),

    /// The catalog could not answer the query
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A user token that could not be resolved and was skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenWarning {
    /// A 1-based index outside the displayed candidate list
    #[error("Index {token} is out of range, ignoring.")]
    IndexOutOfRange { token: String, len: usize },

    /// A name that matches no known genre (case-insensitively)
    #[error("Genre '{0}' not found, ignoring.")]
    UnknownGenre(String),

    /// A year token that is not a plain integer
    #[error("Ignoring invalid year '{0}'.")]
    InvalidYear(String),

    /// A well-formed year that no movie has
    #[error("Year {0} not found in the catalog, ignoring.")]
    UnknownYear(String),

    /// A rating entry that is not a number
    #[error("Invalid rating input '{0}', please use a number like 7.5")]
    InvalidRating(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ComposeError>;
