//! Terminal rendering of listings, warnings and errors.

use catalog::{format_rating, MovieRecord};
use colored::Colorize;
use composer::{ComposeError, Listing, TokenWarning};
use std::io::{self, Write};

/// Placeholder for a year or rating the store left empty
const MISSING: &str = "-";

/// One display line for a movie.
pub fn movie_line(movie: &MovieRecord) -> String {
    let year = movie
        .year
        .map_or_else(|| MISSING.to_string(), |y| y.to_string());
    let rating = movie
        .rating
        .map_or_else(|| MISSING.to_string(), format_rating);
    format!(
        "🎬 {} ({}) - {} | ⭐ {}",
        movie.title.bold(),
        year,
        movie.genres,
        rating
    )
}

/// Print a listing, or the explicit no-results message.
pub fn write_listing<W: Write>(out: &mut W, listing: &Listing) -> io::Result<()> {
    writeln!(out)?;
    match listing {
        Listing::Empty => {
            writeln!(out, "{}", "⚠️  No movies found with your filters.".yellow())?;
        }
        Listing::Movies(movies) => {
            for movie in movies {
                writeln!(out, "{}", movie_line(movie))?;
            }
        }
    }
    writeln!(out)
}

/// Print every dropped token.
pub fn write_warnings<W: Write>(out: &mut W, warnings: &[TokenWarning]) -> io::Result<()> {
    for warning in warnings {
        writeln!(out, "{}", warning.to_string().yellow())?;
    }
    Ok(())
}

/// Print an operation failure plus its diagnostic hint, if any.
pub fn write_error<W: Write>(out: &mut W, err: &ComposeError) -> io::Result<()> {
    writeln!(out, "{} {}", "ERROR:".red().bold(), err)?;
    if let ComposeError::Catalog(inner) = err {
        if let Some(hint) = inner.hint() {
            writeln!(out, "{hint}")?;
        }
    }
    Ok(())
}
