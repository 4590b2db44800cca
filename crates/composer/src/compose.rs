//! The FilterComposer turns a filter state into a catalog query.
//!
//! This module owns the mapping from user selections to a [`QuerySpec`]
//! and hands execution to whatever [`Catalog`] it is given. It performs no
//! I/O of its own.

use crate::error::{ComposeError, Result};
use crate::state::FilterState;
use catalog::{Catalog, MovieRecord, QuerySpec};
use tracing::debug;

/// Outcome of a listing: either some movies or an explicit "nothing found".
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Empty,
    Movies(Vec<MovieRecord>),
}

impl Listing {
    /// Wrap catalog rows, turning an empty result into [`Listing::Empty`].
    pub fn from_rows(rows: Vec<MovieRecord>) -> Self {
        if rows.is_empty() {
            Listing::Empty
        } else {
            Listing::Movies(rows)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        match self {
            Listing::Empty => &[],
            Listing::Movies(movies) => movies,
        }
    }
}

/// Compiles filter states into query specs and runs them.
///
/// ## Usage
/// ```ignore
/// let composer = FilterComposer::new();
/// let listing = composer.run(&catalog, &state)?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterComposer;

impl FilterComposer {
    pub fn new() -> Self {
        Self
    }

    /// Build the query spec for `state`.
    ///
    /// Empty genre or year selections leave that category unconstrained.
    /// Any finite rating floor is accepted, negative ones included; only a
    /// NaN or infinite floor is rejected.
    pub fn compose(&self, state: &FilterState) -> Result<QuerySpec> {
        let mut builder = QuerySpec::builder()
            .genres(&state.genres, state.match_mode)
            .years(state.years.iter().copied());

        if let Some(floor) = state.min_rating {
            if !floor.is_finite() {
                return Err(ComposeError::InvalidRating(floor));
            }
            builder = builder.min_rating(floor);
        }

        let spec = builder.build();
        debug!(
            genres = state.genres.len(),
            years = state.years.len(),
            min_rating = ?state.min_rating,
            mode = %state.match_mode,
            "composed query spec"
        );
        Ok(spec)
    }

    /// Compose `state` and run it against `catalog`.
    pub fn run<C: Catalog>(&self, catalog: &C, state: &FilterState) -> Result<Listing> {
        let spec = self.compose(state)?;
        let rows = catalog.fetch_filtered(&spec)?;
        debug!(count = rows.len(), "filter applied");
        Ok(Listing::from_rows(rows))
    }

    /// The whole catalog, in listing order.
    pub fn run_all<C: Catalog>(&self, catalog: &C) -> Result<Listing> {
        Ok(Listing::from_rows(catalog.fetch_all()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MatchMode, MemoryCatalog};

    fn create_test_catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.insert_genre(1, "Action");
        catalog.insert_genre(2, "Drama");
        catalog.insert_genre(3, "Comedy");

        catalog.insert_movie(1, "M", 2000, 7.9);
        catalog.insert_movie(2, "N", 2000, 8.0);
        catalog.tag(1, 1);
        catalog.tag(1, 2);
        catalog.tag(2, 3);
        catalog
    }

    #[test]
    fn test_empty_state_is_unconstrained() {
        let spec = FilterComposer::new().compose(&FilterState::new()).unwrap();
        assert!(spec.is_unconstrained());
    }

    #[test]
    fn test_compose_carries_every_selection() {
        let mut state = FilterState::new();
        state.set_genres(["Action".to_string(), "Comedy".to_string()]);
        state.set_years([2000]);
        state.set_min_rating(Some(-1.0));
        state.toggle_match_mode();

        let spec = FilterComposer::new().compose(&state).unwrap();
        let genre = spec.genre().unwrap();
        assert_eq!(genre.mode(), MatchMode::All);
        assert_eq!(genre.names().len(), 2);
        assert_eq!(spec.years().unwrap().len(), 1);
        assert_eq!(spec.min_rating(), Some(-1.0));
    }

    #[test]
    fn test_nan_rating_is_rejected() {
        let mut state = FilterState::new();
        state.set_min_rating(Some(f64::NAN));

        let err = FilterComposer::new().compose(&state).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidRating(_)));
    }

    #[test]
    fn test_any_includes_all_excludes() {
        let catalog = create_test_catalog();
        let composer = FilterComposer::new();

        let mut state = FilterState::new();
        state.set_genres(["Action".to_string(), "Comedy".to_string()]);

        let any = composer.run(&catalog, &state).unwrap();
        assert_eq!(any.movies().len(), 2);

        state.toggle_match_mode();
        let all = composer.run(&catalog, &state).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_rating_boundary() {
        let catalog = create_test_catalog();
        let mut state = FilterState::new();
        state.set_min_rating(Some(8.0));

        let listing = FilterComposer::new().run(&catalog, &state).unwrap();
        let titles: Vec<_> = listing.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["N"]);
    }

    #[test]
    fn test_no_results_is_not_an_error() {
        let catalog = create_test_catalog();
        let mut state = FilterState::new();
        state.set_years([1900]);

        let listing = FilterComposer::new().run(&catalog, &state).unwrap();
        assert_eq!(listing, Listing::Empty);
        assert!(listing.movies().is_empty());
    }
}
