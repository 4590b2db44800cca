use anyhow::{bail, Context, Result};
use catalog::{Catalog, SqliteCatalog, Year};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use composer::selection::{resolve_genres, resolve_years};
use composer::{FilterComposer, FilterState};
use std::io::{self, Write};
use std::path::PathBuf;

mod menu;
mod render;

use menu::MenuSession;

/// Movie Selector - browse and filter a movie catalog
#[derive(Parser)]
#[command(name = "movie-selector")]
#[command(about = "Browse a movie catalog and narrow it down by genre, year and rating", long_about = None)]
struct Cli {
    /// Path to the SQLite catalog (tables Movie, Genre, Movie_Genre)
    #[arg(short, long, env = "MOVIE_SELECTOR_DB", default_value = "database.db")]
    db: PathBuf,

    /// Log filter (e.g. "debug", "composer=debug"); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Browse,

    /// Print a filtered listing and exit
    List(ListArgs),

    /// List the distinct genres in the catalog
    Genres,

    /// List the distinct years in the catalog
    Years,
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Genre name or 1-based index into `genres` (repeatable)
    #[arg(long)]
    genre: Vec<String>,

    /// Release year (repeatable)
    #[arg(long)]
    year: Vec<Year>,

    /// Minimum rating (inclusive)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Require every selected genre instead of any
    #[arg(long)]
    all: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing on stderr so it never interleaves with the menu
    let filter = match &cli.log_level {
        Some(level) => tracing_subscriber::EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log filter '{level}'"))?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let catalog = SqliteCatalog::new(&cli.db);

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => handle_browse(catalog)?,
        Commands::List(args) => {
            handle_list(&catalog, &args, &mut io::stdout().lock(), &mut io::stderr())?
        }
        Commands::Genres => handle_genres(&catalog, &mut io::stdout().lock())?,
        Commands::Years => handle_years(&catalog, &mut io::stdout().lock())?,
    }

    Ok(())
}

/// Handle the 'browse' command
fn handle_browse(catalog: SqliteCatalog) -> Result<()> {
    let stdin = io::stdin();
    let mut session = MenuSession::new(catalog, stdin.lock(), io::stdout());
    session.run()
}

/// Handle the 'list' command
///
/// Unusable `--genre`/`--year` values are reported on `warn_out`. If every
/// requested genre (or year) was dropped the command fails instead of
/// silently listing the unfiltered catalog.
fn handle_list<C: Catalog, W: Write, E: Write>(
    catalog: &C,
    args: &ListArgs,
    out: &mut W,
    warn_out: &mut E,
) -> Result<()> {
    let mut state = FilterState::new();

    if !args.genre.is_empty() {
        let available = catalog.list_genres().context("Failed to list genres")?;
        let warnings =
            resolve_genres(&args.genre.join(","), &available).apply_to(&mut state.genres);
        render::write_warnings(warn_out, &warnings)?;
        if state.genres.is_empty() {
            bail!("None of the requested genres exist in the catalog");
        }
    }
    if !args.year.is_empty() {
        let available = catalog.list_years().context("Failed to list years")?;
        let raw = args
            .year
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let warnings = resolve_years(&raw, &available).apply_to(&mut state.years);
        render::write_warnings(warn_out, &warnings)?;
        if state.years.is_empty() {
            bail!("None of the requested years exist in the catalog");
        }
    }
    state.set_min_rating(args.min_rating);
    if args.all {
        state.toggle_match_mode();
    }

    let listing = FilterComposer::new()
        .run(catalog, &state)
        .context("Failed to list movies")?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, listing.movies())?;
        writeln!(out)?;
    } else {
        render::write_listing(out, &listing)?;
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres<C: Catalog, W: Write>(catalog: &C, out: &mut W) -> Result<()> {
    let genres = catalog.list_genres().context("Failed to list genres")?;
    writeln!(out, "{}", "Available genres:".bold().blue())?;
    for (i, genre) in genres.iter().enumerate() {
        writeln!(out, "  {}. {}", (i + 1).to_string().green(), genre)?;
    }
    Ok(())
}

/// Handle the 'years' command
fn handle_years<C: Catalog, W: Write>(catalog: &C, out: &mut W) -> Result<()> {
    let years = catalog.list_years().context("Failed to list years")?;
    writeln!(out, "{}", "Available years:".bold().blue())?;
    writeln!(
        out,
        "{}",
        years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MemoryCatalog, MovieRecord};

    fn create_test_catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog.insert_genre(1, "Action");
        catalog.insert_genre(2, "Comedy");

        catalog.insert_movie(1, "Heat", 1995, 8.3);
        catalog.insert_movie(2, "Clerks", 1994, 7.9);
        catalog.insert_row(3, "Unrated", Some(1995), None);
        catalog.tag(1, 1);
        catalog.tag(2, 2);
        catalog.tag(3, 1);
        catalog
    }

    /// Run `list` and return (result, stdout, stderr).
    fn run_list(args: ListArgs) -> (Result<()>, String, String) {
        colored::control::set_override(false);
        let catalog = create_test_catalog();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = handle_list(&catalog, &args, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_cli_parses_list_flags() {
        let cli = Cli::try_parse_from([
            "movie-selector",
            "--db",
            "movies.db",
            "list",
            "--genre",
            "Action",
            "--genre",
            "2",
            "--year",
            "1995",
            "--min-rating",
            "7.5",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.db, PathBuf::from("movies.db"));
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.genre, vec!["Action", "2"]);
        assert_eq!(args.year, vec![1995]);
        assert_eq!(args.min_rating, Some(7.5));
        assert!(args.all && !args.json);
    }

    #[test]
    fn test_list_text() {
        let (result, out, err) = run_list(ListArgs {
            genre: vec!["action".to_string()],
            ..ListArgs::default()
        });

        result.unwrap();
        assert!(err.is_empty());
        assert!(out.contains("🎬 Heat (1995) - Action | ⭐ 8.3"));
        assert!(out.contains("🎬 Unrated (1995) - Action | ⭐ -"));
        assert!(!out.contains("Clerks"));
    }

    #[test]
    fn test_list_json() {
        let (result, out, _) = run_list(ListArgs {
            json: true,
            ..ListArgs::default()
        });

        result.unwrap();
        let movies: Vec<MovieRecord> = serde_json::from_str(&out).unwrap();
        let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat", "Unrated", "Clerks"]);

        let raw: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(raw[1]["rating"].is_null());
    }

    #[test]
    fn test_list_empty_result_is_not_an_error() {
        let (result, out, _) = run_list(ListArgs {
            min_rating: Some(9.5),
            ..ListArgs::default()
        });

        result.unwrap();
        assert!(out.contains("No movies found with your filters."));
    }

    #[test]
    fn test_list_unknown_genre_fails_instead_of_listing_everything() {
        let (result, out, err) = run_list(ListArgs {
            genre: vec!["Western".to_string()],
            ..ListArgs::default()
        });

        assert!(result.is_err());
        assert!(err.contains("Genre 'Western' not found"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_keeps_known_genres_when_some_are_unknown() {
        let (result, out, err) = run_list(ListArgs {
            genre: vec!["Western".to_string(), "Comedy".to_string()],
            ..ListArgs::default()
        });

        result.unwrap();
        assert!(err.contains("Western"));
        assert!(out.contains("Clerks"));
        assert!(!out.contains("Heat"));
    }

    #[test]
    fn test_list_unknown_year_fails() {
        let (result, _, err) = run_list(ListArgs {
            year: vec![1850],
            ..ListArgs::default()
        });

        assert!(result.is_err());
        assert!(err.contains("1850"));
    }

    #[test]
    fn test_genres_and_years() {
        colored::control::set_override(false);
        let catalog = create_test_catalog();

        let mut out = Vec::new();
        handle_genres(&catalog, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. Action"));
        assert!(text.contains("  2. Comedy"));

        let mut out = Vec::new();
        handle_years(&catalog, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("1995, 1994"));
    }

    #[test]
    fn test_missing_store_fails_one_shot_commands() {
        let catalog = SqliteCatalog::new("/nonexistent/movie-selector/missing.db");
        let err = handle_genres(&catalog, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("unavailable"));
    }
}
