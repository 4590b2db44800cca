//! Integration tests for the composer.
//!
//! These tests run filter states end to end: user input is resolved into a
//! FilterState, composed into a QuerySpec and executed against a real
//! SQLite catalog file.

use catalog::{CATALOG_SCHEMA, Catalog, SqliteCatalog};
use composer::selection::{resolve_genres, resolve_years};
use composer::{FilterComposer, FilterState, Listing, TokenWarning};
use rusqlite::{Connection, params};
use tempfile::TempDir;

fn create_test_setup() -> (TempDir, SqliteCatalog) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(CATALOG_SCHEMA).unwrap();

    for (id, name) in [(1, "Action"), (2, "Comedy"), (3, "Drama")] {
        conn.execute("INSERT INTO Genre (Id, Genre_name) VALUES (?1, ?2)", params![id, name])
            .unwrap();
    }

    let movies = [
        (1, "M", 2001, 7.2),
        (2, "Rated Low", 2001, 7.9),
        (3, "Rated Exact", 1998, 8.0),
        (4, "No Genres", 1998, 9.1),
    ];
    for (id, name, year, rating) in movies {
        conn.execute(
            "INSERT INTO Movie (Id, Name, Year, Rating) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, year, rating],
        )
        .unwrap();
    }

    // M: {Action, Drama}; Rated Low: {Comedy}; Rated Exact: {Action, Comedy}
    for (movie, genre) in [(1, 1), (1, 3), (2, 2), (3, 1), (3, 2)] {
        conn.execute(
            "INSERT INTO Movie_Genre (Movie_Id, Genre_Id) VALUES (?1, ?2)",
            params![movie, genre],
        )
        .unwrap();
    }
    drop(conn);

    (dir, SqliteCatalog::new(path))
}

fn titles(listing: &Listing) -> Vec<&str> {
    listing.movies().iter().map(|m| m.title.as_str()).collect()
}

#[test]
fn test_empty_state_matches_fetch_all() {
    let (_dir, catalog) = create_test_setup();
    let listing = FilterComposer::new().run(&catalog, &FilterState::new()).unwrap();

    assert_eq!(listing.movies(), catalog.fetch_all().unwrap().as_slice());
    assert_eq!(titles(&listing), vec!["M", "Rated Low", "No Genres", "Rated Exact"]);
}

#[test]
fn test_untagged_movie_has_empty_annotation() {
    let (_dir, catalog) = create_test_setup();
    let listing = FilterComposer::new().run_all(&catalog).unwrap();

    let untagged = listing
        .movies()
        .iter()
        .find(|m| m.title == "No Genres")
        .unwrap();
    assert_eq!(untagged.genres, "");
}

#[test]
fn test_index_selection_then_any_and_all() {
    let (_dir, catalog) = create_test_setup();
    let composer = FilterComposer::new();
    let genres = catalog.list_genres().unwrap();

    let mut state = FilterState::new();
    // "1,2" -> Action, Comedy
    let warnings = resolve_genres("1,2", &genres).apply_to(&mut state.genres);
    assert!(warnings.is_empty());

    let any = composer.run(&catalog, &state).unwrap();
    assert_eq!(titles(&any), vec!["M", "Rated Low", "Rated Exact"]);

    state.toggle_match_mode();
    let all = composer.run(&catalog, &state).unwrap();
    // M has {Action, Drama}, missing Comedy
    assert_eq!(titles(&all), vec!["Rated Exact"]);
    assert_eq!(all.movies()[0].genres, "Action, Comedy");
}

#[test]
fn test_rating_floor_boundary() {
    let (_dir, catalog) = create_test_setup();
    let mut state = FilterState::new();
    state.set_min_rating(Some(8.0));

    let listing = FilterComposer::new().run(&catalog, &state).unwrap();
    assert!(titles(&listing).contains(&"Rated Exact"));
    assert!(!titles(&listing).contains(&"Rated Low"));
}

#[test]
fn test_year_selection_drops_unknown_years() {
    let (_dir, catalog) = create_test_setup();
    let years = catalog.list_years().unwrap();

    let mut state = FilterState::new();
    let warnings = resolve_years("1998, 1850, abc", &years).apply_to(&mut state.years);
    assert_eq!(
        warnings,
        vec![
            TokenWarning::UnknownYear("1850".to_string()),
            TokenWarning::InvalidYear("abc".to_string()),
        ]
    );

    let listing = FilterComposer::new().run(&catalog, &state).unwrap();
    assert_eq!(titles(&listing), vec!["No Genres", "Rated Exact"]);
}

#[test]
fn test_filters_combine_with_and() {
    let (_dir, catalog) = create_test_setup();
    let mut state = FilterState::new();
    state.set_genres(["comedy".to_string()]);
    state.set_years([2001]);
    state.set_min_rating(Some(7.5));

    let listing = FilterComposer::new().run(&catalog, &state).unwrap();
    assert_eq!(titles(&listing), vec!["Rated Low"]);
}

#[test]
fn test_no_match_is_empty_listing() {
    let (_dir, catalog) = create_test_setup();
    let mut state = FilterState::new();
    state.set_genres(["Drama".to_string()]);
    state.set_years([1998]);

    let listing = FilterComposer::new().run(&catalog, &state).unwrap();
    assert!(listing.is_empty());
}

#[test]
fn test_missing_store_surfaces_catalog_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = SqliteCatalog::new(dir.path().join("gone.db"));

    let err = FilterComposer::new()
        .run(&catalog, &FilterState::new())
        .unwrap_err();
    assert!(matches!(err, composer::ComposeError::Catalog(_)));
}
