//! # Catalog Crate
//!
//! Read-only access to the movie catalog: a relational store of movies,
//! genres and the many-to-many association between them.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, MovieId, Year)
//! - **query**: Storage-agnostic query specification (QuerySpec, MatchMode)
//! - **store**: The `Catalog` trait every backend implements
//! - **sqlite**: SQLite backend, one read-only connection per operation
//! - **memory**: In-memory backend with the same contract
//! - **schema**: The three-table store contract and its validation
//! - **error**: Error types for catalog reads
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, MatchMode, QuerySpec, SqliteCatalog};
//!
//! let catalog = SqliteCatalog::new("database.db");
//! let genres = catalog.list_genres()?;
//!
//! let spec = QuerySpec::builder()
//!     .genres(["Action", "Drama"], MatchMode::All)
//!     .min_rating(8.0)
//!     .build();
//!
//! for movie in catalog.fetch_filtered(&spec)? {
//!     println!("{} ({:?}) - {}", movie.title, movie.year, movie.genres);
//! }
//! ```

// Public modules
pub mod error;
pub mod memory;
pub mod query;
pub mod schema;
pub mod sqlite;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use memory::MemoryCatalog;
pub use query::{GenreClause, MatchMode, QuerySpec, QuerySpecBuilder};
pub use schema::CATALOG_SCHEMA;
pub use sqlite::SqliteCatalog;
pub use store::Catalog;
pub use types::{format_rating, MovieId, MovieRecord, Year};
