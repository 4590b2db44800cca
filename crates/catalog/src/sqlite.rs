//! SQLite-backed catalog.
//!
//! Each operation opens its own read-only connection, runs exactly one
//! query and drops the connection before returning. Nothing is pooled and
//! nothing is ever written.

use crate::error::{CatalogError, Result};
use crate::query::{MatchMode, QuerySpec};
use crate::schema::validate_schema;
use crate::store::Catalog;
use crate::types::{MovieId, MovieRecord, Year, GENRE_SEPARATOR};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use tracing::{debug, info};

/// Catalog stored in a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    path: PathBuf,
}

impl SqliteCatalog {
    /// Point at a database file. Nothing is opened until the first read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a read-only connection and check the schema.
    ///
    /// A missing file is reported as unavailable instead of letting SQLite
    /// create an empty database in its place.
    fn connect(&self) -> Result<Connection> {
        if !self.path.is_file() {
            return Err(CatalogError::StoreUnavailable {
                path: self.path.clone(),
                reason: "database file not found".to_string(),
            });
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.classify(e))?;

        validate_schema(&conn).map_err(|e| match e {
            CatalogError::Query(raw) => self.classify(raw),
            other => other,
        })?;

        info!(path = %self.path.display(), "opened catalog store");
        Ok(conn)
    }

    fn classify(&self, err: rusqlite::Error) -> CatalogError {
        CatalogError::from_sqlite(&self.path, err)
    }
}

impl Catalog for SqliteCatalog {
    fn list_genres(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT Genre_name FROM Genre WHERE Genre_name IS NOT NULL ORDER BY Genre_name")
            .map_err(|e| self.classify(e))?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.classify(e))
    }

    fn list_years(&self) -> Result<Vec<Year>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT Year FROM Movie WHERE Year IS NOT NULL ORDER BY Year DESC")
            .map_err(|e| self.classify(e))?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.classify(e))
    }

    fn fetch_filtered(&self, spec: &QuerySpec) -> Result<Vec<MovieRecord>> {
        let query = compile(spec);
        debug!(
            params = query.params.len(),
            unconstrained = spec.is_unconstrained(),
            "compiled catalog query"
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&query.sql).map_err(|e| self.classify(e))?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(query.params.iter()), |row| {
                Ok(JoinedRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    year: row.get(2)?,
                    rating: row.get(3)?,
                    genre_id: row.get(4)?,
                    genre_name: row.get(5)?,
                })
            })
            .map_err(|e| self.classify(e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.classify(e))?;

        let movies = fold_rows(rows);
        debug!(count = movies.len(), "fetched movies");
        Ok(movies)
    }
}

// =============================================================================
// Query compilation
// =============================================================================

/// A query ready for execution: SQL text plus positional parameters.
///
/// Values never appear in `sql`; they are bound as `?N` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl CompiledQuery {
    /// Append a parameter and return its placeholder.
    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("?{}", self.params.len())
    }
}

// Name, Year and Rating are nullable in the store; a NULL title reads as ''
const SELECT_MOVIES: &str = "SELECT m.Id, COALESCE(m.Name, ''), m.Year, m.Rating, g.Id, g.Genre_name
FROM Movie m
LEFT JOIN Movie_Genre mg ON mg.Movie_Id = m.Id
LEFT JOIN Genre g ON g.Id = mg.Genre_Id";

const ORDER_MOVIES: &str =
    "ORDER BY m.Year DESC, COALESCE(m.Name, '') ASC, m.Id ASC, mg.Id ASC";

/// Compile a [`QuerySpec`] into SQLite SQL.
///
/// The genre predicate is a subquery on movie ids rather than a filter on
/// the outer join, so every genre of a matching movie still comes back for
/// its annotation. ALL mode counts *distinct* matching names per movie.
pub fn compile(spec: &QuerySpec) -> CompiledQuery {
    let mut query = CompiledQuery {
        sql: String::new(),
        params: Vec::new(),
    };
    let mut predicates: Vec<String> = Vec::new();

    if let Some(clause) = spec.genre() {
        let placeholders: Vec<String> = clause
            .names()
            .iter()
            .map(|name| query.bind(Value::Text(name.clone())))
            .collect();

        let mut subquery = format!(
            "m.Id IN (SELECT mg2.Movie_Id FROM Movie_Genre mg2 \
             JOIN Genre g2 ON g2.Id = mg2.Genre_Id \
             WHERE lower(g2.Genre_name) IN ({}) \
             GROUP BY mg2.Movie_Id",
            placeholders.join(", ")
        );
        if clause.mode() == MatchMode::All {
            let threshold = query.bind(Value::Integer(clause.names().len() as i64));
            subquery.push_str(&format!(
                " HAVING COUNT(DISTINCT lower(g2.Genre_name)) = {threshold}"
            ));
        }
        subquery.push(')');
        predicates.push(subquery);
    }

    if let Some(years) = spec.years() {
        let placeholders: Vec<String> = years
            .iter()
            .map(|&year| query.bind(Value::Integer(year)))
            .collect();
        predicates.push(format!("m.Year IN ({})", placeholders.join(", ")));
    }

    if let Some(floor) = spec.min_rating() {
        let placeholder = query.bind(Value::Real(floor));
        predicates.push(format!("m.Rating >= {placeholder}"));
    }

    query.sql.push_str(SELECT_MOVIES);
    if !predicates.is_empty() {
        query.sql.push_str("\nWHERE ");
        query.sql.push_str(&predicates.join("\n  AND "));
    }
    query.sql.push('\n');
    query.sql.push_str(ORDER_MOVIES);
    query
}

// =============================================================================
// Row assembly
// =============================================================================

/// One movie-association row as returned by the outer join.
#[derive(Debug)]
struct JoinedRow {
    id: MovieId,
    title: String,
    year: Option<Year>,
    rating: Option<f64>,
    genre_id: Option<i64>,
    genre_name: Option<String>,
}

/// Fold consecutive rows of the same movie into one record.
///
/// Rows arrive grouped by movie (the id is part of the sort key) and in
/// association-insertion order within each movie. A genre tagged twice
/// is listed once; a dangling association (no genre row) is skipped.
fn fold_rows(rows: Vec<JoinedRow>) -> Vec<MovieRecord> {
    let mut movies: Vec<MovieRecord> = Vec::new();
    let mut seen_genres: Vec<i64> = Vec::new();

    for row in rows {
        let same_movie = movies.last().is_some_and(|m| m.id == row.id);
        if !same_movie {
            seen_genres.clear();
            movies.push(MovieRecord {
                id: row.id,
                title: row.title,
                year: row.year,
                rating: row.rating,
                genres: String::new(),
            });
        }

        let (Some(genre_id), Some(name)) = (row.genre_id, row.genre_name) else {
            continue;
        };
        if seen_genres.contains(&genre_id) {
            continue;
        }
        seen_genres.push(genre_id);

        if let Some(movie) = movies.last_mut() {
            if !movie.genres.is_empty() {
                movie.genres.push_str(GENRE_SEPARATOR);
            }
            movie.genres.push_str(&name);
        }
    }

    movies
}
