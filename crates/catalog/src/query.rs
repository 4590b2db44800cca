//! Storage-agnostic query specification.
//!
//! A [`QuerySpec`] is an immutable set of optional predicate clauses. It
//! says *what* to select, never *how*: each [`Catalog`](crate::Catalog)
//! implementation compiles it into its own native query form.
//!
//! ## Semantics
//! - Clauses combine with AND; an absent clause is unconstrained.
//! - Genre (ANY): the movie has at least one requested genre.
//! - Genre (ALL): the movie's genres are a superset of the requested ones.
//! - Years: exact membership.
//! - Rating: inclusive lower bound.
//! - A movie with no year or no rating fails that clause, just as SQL
//!   `NULL IN (...)` and `NULL >= ?` never hold.
//!
//! ## Example Usage
//! ```ignore
//! let spec = QuerySpec::builder()
//!     .genres(["Action", "Drama"], MatchMode::All)
//!     .years([1999, 2000])
//!     .min_rating(7.5)
//!     .build();
//! ```

use crate::types::Year;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// How a multi-genre selection is matched against a movie's genres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// At least one selected genre is present
    #[default]
    Any,
    /// Every selected genre is present (the movie may have others)
    All,
}

impl MatchMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            MatchMode::Any => MatchMode::All,
            MatchMode::All => MatchMode::Any,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Any => write!(f, "ANY"),
            MatchMode::All => write!(f, "ALL"),
        }
    }
}

/// Fold a genre name the way the store's `lower()` does (ASCII only).
pub fn fold_genre(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Genre predicate: a non-empty set of folded names plus the match mode.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreClause {
    names: BTreeSet<String>,
    mode: MatchMode,
}

impl GenreClause {
    /// Folded genre names. Their count is the ALL-mode threshold.
    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Test a movie's genre names against this clause.
    ///
    /// Counts *distinct* matching names, so duplicate tags or extra
    /// unrequested genres never change the outcome.
    pub fn matches<'a>(&self, genres: impl IntoIterator<Item = &'a str>) -> bool {
        let matched: HashSet<String> = genres
            .into_iter()
            .map(fold_genre)
            .filter(|g| self.names.contains(g))
            .collect();

        match self.mode {
            MatchMode::Any => !matched.is_empty(),
            MatchMode::All => matched.len() == self.names.len(),
        }
    }
}

/// Immutable description of the predicates to apply to a catalog read.
///
/// Ordering is not part of the spec: every listing follows the same
/// total order (see [`listing_order`](crate::types::listing_order)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    genre: Option<GenreClause>,
    years: Option<BTreeSet<Year>>,
    min_rating: Option<f64>,
}

impl QuerySpec {
    /// Start building a spec.
    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::default()
    }

    /// A spec with no predicates: selects the whole catalog.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn genre(&self) -> Option<&GenreClause> {
        self.genre.as_ref()
    }

    pub fn years(&self) -> Option<&BTreeSet<Year>> {
        self.years.as_ref()
    }

    pub fn min_rating(&self) -> Option<f64> {
        self.min_rating
    }

    /// True when no clause is set.
    pub fn is_unconstrained(&self) -> bool {
        self.genre.is_none() && self.years.is_none() && self.min_rating.is_none()
    }

    /// Evaluate the spec against one movie in memory.
    pub fn matches<'a>(
        &self,
        year: Option<Year>,
        rating: Option<f64>,
        genres: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        if let Some(years) = &self.years {
            if !year.is_some_and(|y| years.contains(&y)) {
                return false;
            }
        }
        if let Some(floor) = self.min_rating {
            if !rating.is_some_and(|r| r >= floor) {
                return false;
            }
        }
        match &self.genre {
            Some(clause) => clause.matches(genres),
            None => true,
        }
    }
}

/// Builder for [`QuerySpec`] (builder pattern, consumes and returns `self`).
#[derive(Debug, Default)]
pub struct QuerySpecBuilder {
    spec: QuerySpec,
}

impl QuerySpecBuilder {
    /// Restrict by genre. An empty set leaves genre unconstrained.
    pub fn genres<I, S>(mut self, names: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = names
            .into_iter()
            .map(|n| fold_genre(n.as_ref()))
            .collect();

        self.spec.genre = if names.is_empty() {
            None
        } else {
            Some(GenreClause { names, mode })
        };
        self
    }

    /// Restrict by year membership. An empty set leaves year unconstrained.
    pub fn years(mut self, years: impl IntoIterator<Item = Year>) -> Self {
        let years: BTreeSet<Year> = years.into_iter().collect();
        self.spec.years = if years.is_empty() { None } else { Some(years) };
        self
    }

    /// Keep only movies rated at or above `floor`.
    pub fn min_rating(mut self, floor: f64) -> Self {
        self.spec.min_rating = Some(floor);
        self
    }

    pub fn build(self) -> QuerySpec {
        self.spec
    }
}
