//! The relational contract of the catalog store.
//!
//! The store is owned by someone else; this crate never creates or
//! migrates it. It only checks that the three expected tables exist
//! with the expected columns before reading from them.

use crate::error::{CatalogError, Result};
use rusqlite::Connection;

/// DDL describing the store layout, used to build fixtures. Only the keys
/// are constrained; every other column may hold NULL.
pub const CATALOG_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Movie (
    Id INTEGER PRIMARY KEY,
    Name TEXT,
    Year INTEGER,
    Rating REAL
);

CREATE TABLE IF NOT EXISTS Genre (
    Id INTEGER PRIMARY KEY,
    Genre_name TEXT
);

CREATE TABLE IF NOT EXISTS Movie_Genre (
    Id INTEGER PRIMARY KEY,
    Movie_Id INTEGER NOT NULL REFERENCES Movie(Id),
    Genre_Id INTEGER NOT NULL REFERENCES Genre(Id)
);
"#;

/// Tables and the columns each must carry.
pub const EXPECTED_TABLES: &[(&str, &[&str])] = &[
    ("Movie", &["Id", "Name", "Year", "Rating"]),
    ("Genre", &["Id", "Genre_name"]),
    ("Movie_Genre", &["Id", "Movie_Id", "Genre_Id"]),
];

/// Check that every expected table and column is present.
///
/// Column names are compared case-insensitively, as SQLite resolves them.
pub fn validate_schema(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;

    for (table, columns) in EXPECTED_TABLES {
        let present = stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if present.is_empty() {
            return Err(CatalogError::SchemaMismatch {
                detail: format!("missing table '{table}'"),
            });
        }

        for column in *columns {
            if !present.iter().any(|p| p.eq_ignore_ascii_case(column)) {
                return Err(CatalogError::SchemaMismatch {
                    detail: format!("table '{table}' has no column '{column}'"),
                });
            }
        }
    }

    Ok(())
}
