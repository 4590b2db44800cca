//! Core domain types for the movie catalog.
//!
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (MovieId, Year)
//! - Structs with public fields
//! - Derive macros for common traits (including serde)

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (the `Movie.Id` column)
pub type MovieId = i64;

/// Release year of a movie (the `Movie.Year` column)
pub type Year = i64;

/// Separator used when joining genre names into an annotation
pub const GENRE_SEPARATOR: &str = ", ";

// =============================================================================
// Movie Record
// =============================================================================

/// One fully resolved row of a catalog listing, ready for display.
///
/// `genres` is never lazily loaded: by the time a record leaves the
/// catalog it already carries every genre of the movie, joined with
/// [`GENRE_SEPARATOR`] in the order the associations were inserted.
/// A movie without genres carries an empty string.
///
/// The store does not declare its columns NOT NULL. A missing year or
/// rating stays `None` (serialized as `null`); a missing title reads as
/// an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub year: Option<Year>,
    /// Conventionally 0-10, but the catalog imposes no range
    pub rating: Option<f64>,
    pub genres: String,
}

impl MovieRecord {
    /// Build a record from its genre names, joining them into the annotation.
    pub fn new<S: AsRef<str>>(
        id: MovieId,
        title: impl Into<String>,
        year: Option<Year>,
        rating: Option<f64>,
        genres: &[S],
    ) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            rating,
            genres: genres
                .iter()
                .map(|g| g.as_ref())
                .collect::<Vec<_>>()
                .join(GENRE_SEPARATOR),
        }
    }
}

/// Total ordering contract shared by every listing: year descending,
/// then title ascending (case-sensitive, byte-wise), then id.
///
/// A missing year sorts after every real one, as SQLite's `DESC` puts
/// NULLs last. The id tiebreak only matters for duplicate title/year
/// pairs and keeps the order stable between the SQLite and in-memory
/// catalogs.
pub fn listing_order(a: &MovieRecord, b: &MovieRecord) -> std::cmp::Ordering {
    b.year
        .cmp(&a.year)
        .then_with(|| a.title.as_bytes().cmp(b.title.as_bytes()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Show whole ratings with one decimal (`8.0`), others as stored (`7.25`).
pub fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}
