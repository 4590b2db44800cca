//! Core trait for reading the catalog.
//!
//! The [`Catalog`] trait is the seam between the filter composer and the
//! storage engine: the composer only ever hands over a [`QuerySpec`].

use crate::error::Result;
use crate::query::QuerySpec;
use crate::types::{MovieRecord, Year};

/// Read-only access to a movie catalog.
///
/// ## Design Note
/// - Every call is a single bounded, blocking read
/// - Every returned listing follows the same total order
///   (year descending, title ascending)
/// - Records are fully resolved: genre annotations included
pub trait Catalog {
    /// Distinct genre names, ascending.
    fn list_genres(&self) -> Result<Vec<String>>;

    /// Distinct years present on any movie, descending.
    fn list_years(&self) -> Result<Vec<Year>>;

    /// Movies matching `spec`, one record per movie.
    fn fetch_filtered(&self, spec: &QuerySpec) -> Result<Vec<MovieRecord>>;

    /// Every movie in the catalog.
    fn fetch_all(&self) -> Result<Vec<MovieRecord>> {
        self.fetch_filtered(&QuerySpec::unconstrained())
    }
}
