//! In-memory catalog.
//!
//! Mirrors the SQLite store's tables (movies, genres, associations) with
//! plain collections and evaluates a [`QuerySpec`] directly in Rust. Useful
//! for running the filter session headless and as a reference when
//! checking the SQLite results.

use crate::error::Result;
use crate::query::QuerySpec;
use crate::store::Catalog;
use crate::types::{listing_order, MovieId, MovieRecord, Year};
use std::collections::{BTreeSet, HashMap};

/// Identifier of a genre row
pub type GenreId = i64;

#[derive(Debug, Clone)]
struct MovieRow {
    title: String,
    year: Option<Year>,
    rating: Option<f64>,
}

/// A catalog held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    movies: HashMap<MovieId, MovieRow>,
    genres: HashMap<GenreId, String>,
    /// (movie, genre) pairs in insertion order
    tags: Vec<(MovieId, GenreId)>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a movie.
    pub fn insert_movie(&mut self, id: MovieId, title: impl Into<String>, year: Year, rating: f64) {
        self.insert_row(id, title, Some(year), Some(rating));
    }

    /// Insert (or replace) a movie whose year or rating may be missing,
    /// like a row holding NULLs in the store.
    pub fn insert_row(
        &mut self,
        id: MovieId,
        title: impl Into<String>,
        year: Option<Year>,
        rating: Option<f64>,
    ) {
        self.movies.insert(
            id,
            MovieRow {
                title: title.into(),
                year,
                rating,
            },
        );
    }

    /// Insert (or replace) a genre.
    pub fn insert_genre(&mut self, id: GenreId, name: impl Into<String>) {
        self.genres.insert(id, name.into());
    }

    /// Associate a movie with a genre. Duplicate associations are kept,
    /// just like duplicate rows in the join table.
    pub fn tag(&mut self, movie: MovieId, genre: GenreId) {
        self.tags.push((movie, genre));
    }

    /// Genre names of a movie in association order, each listed once.
    fn genres_of(&self, movie: MovieId) -> Vec<&str> {
        let mut seen: Vec<GenreId> = Vec::new();
        let mut names = Vec::new();

        for &(m, g) in &self.tags {
            if m != movie || seen.contains(&g) {
                continue;
            }
            if let Some(name) = self.genres.get(&g) {
                seen.push(g);
                names.push(name.as_str());
            }
        }
        names
    }
}

impl Catalog for MemoryCatalog {
    fn list_genres(&self) -> Result<Vec<String>> {
        let names: BTreeSet<&String> = self.genres.values().collect();
        Ok(names.into_iter().cloned().collect())
    }

    fn list_years(&self) -> Result<Vec<Year>> {
        let years: BTreeSet<Year> = self.movies.values().filter_map(|m| m.year).collect();
        Ok(years.into_iter().rev().collect())
    }

    fn fetch_filtered(&self, spec: &QuerySpec) -> Result<Vec<MovieRecord>> {
        let mut movies: Vec<MovieRecord> = self
            .movies
            .iter()
            .filter_map(|(&id, row)| {
                let genres = self.genres_of(id);
                spec.matches(row.year, row.rating, genres.iter().copied())
                    .then(|| MovieRecord::new(id, row.title.clone(), row.year, row.rating, genres.as_slice()))
            })
            .collect();

        movies.sort_by(listing_order);
        Ok(movies)
    }
}
