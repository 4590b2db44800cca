//! Filter composition for the movie catalog.
//!
//! This crate provides:
//! - FilterState: the session's genre/year/rating/match-mode selections
//! - FilterComposer: compiles a FilterState into a QuerySpec and runs it
//! - selection: turns raw comma-separated user input into selections
//!
//! ## Architecture
//! Selections flow through the crate in stages:
//! 1. Raw prompt input is resolved against the displayed candidates
//!    (invalid tokens are dropped with a warning)
//! 2. Resolved values replace the matching part of the FilterState
//! 3. FilterComposer builds a storage-agnostic QuerySpec from the state
//! 4. The Catalog compiles and runs it, returning ordered MovieRecords
//!
//! ## Example Usage
//! ```ignore
//! use catalog::SqliteCatalog;
//! use composer::{FilterComposer, FilterState, selection};
//!
//! let catalog = SqliteCatalog::new("database.db");
//! let mut state = FilterState::new();
//!
//! let genres = catalog.list_genres()?;
//! selection::resolve_genres("1, 3", &genres).apply_to(&mut state.genres);
//!
//! let listing = FilterComposer::new().run(&catalog, &state)?;
//! ```

pub mod compose;
pub mod error;
pub mod selection;
pub mod state;

// Re-export main types
pub use compose::{FilterComposer, Listing};
pub use error::{ComposeError, Result, TokenWarning};
pub use selection::{Resolution, Selection};
pub use state::FilterState;
