//! Interactive menu session.
//!
//! A [`MenuSession`] is the explicit context every menu handler works on:
//! it owns the filter state for the lifetime of the session and talks to
//! the user only through the reader and writer it was given, so the same
//! logic runs against a terminal or a scripted test harness.

use crate::render::{write_error, write_listing, write_warnings};
use anyhow::Result;
use catalog::Catalog;
use colored::Colorize;
use composer::selection::{parse_min_rating, resolve_genres, resolve_years};
use composer::{ComposeError, FilterComposer, FilterState, Listing};
use std::io::{BufRead, Write};
use tracing::debug;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "-------------------";

/// One interactive session over a catalog.
pub struct MenuSession<C, R, W> {
    catalog: C,
    input: R,
    out: W,
    state: FilterState,
    composer: FilterComposer,
}

impl<C: Catalog, R: BufRead, W: Write> MenuSession<C, R, W> {
    /// Start a session with empty filters.
    pub fn new(catalog: C, input: R, out: W) -> Self {
        Self {
            catalog,
            input,
            out,
            state: FilterState::new(),
            composer: FilterComposer::new(),
        }
    }

    /// Current filter selections.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_main_menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-3): ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.view_all()?,
                "2" => {
                    if !self.filter_menu()? {
                        break;
                    }
                }
                "3" => {
                    writeln!(self.out, "\nThank you for using Movie Selector! Goodbye 👋\n")?;
                    break;
                }
                _ => writeln!(self.out, "{}", "Invalid choice, try again.".yellow())?,
            }
        }
        Ok(())
    }

    fn print_main_menu(&mut self) -> Result<()> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "{}", "🎬  Welcome to the Movie Selector  🎬".bold().blue())?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "1. View all movies")?;
        writeln!(self.out, "2. Filter movies (choose multiple filters)")?;
        writeln!(self.out, "3. Exit")?;
        writeln!(self.out, "{RULE}")?;
        Ok(())
    }

    /// Run the filter menu. Returns `false` if input ended inside it.
    pub fn filter_menu(&mut self) -> Result<bool> {
        loop {
            writeln!(self.out, "\n{}", "--- Filter Menu ---".bold())?;
            writeln!(self.out, "{}", self.state)?;
            writeln!(self.out, "{THIN_RULE}")?;
            writeln!(self.out, "1. Choose genres")?;
            writeln!(self.out, "2. Choose years")?;
            writeln!(self.out, "3. Set minimum rating")?;
            writeln!(self.out, "4. Toggle genre match mode (Any / All)")?;
            writeln!(self.out, "5. Show results (apply filters)")?;
            writeln!(self.out, "6. Clear filters")?;
            writeln!(self.out, "7. Back to main menu")?;
            writeln!(self.out, "{THIN_RULE}")?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(false);
            };
            debug!(choice = %choice, "filter menu");

            match choice.as_str() {
                "1" => self.choose_genres()?,
                "2" => self.choose_years()?,
                "3" => self.set_min_rating()?,
                "4" => {
                    let mode = self.state.toggle_match_mode();
                    writeln!(self.out, "Genre match mode set to: {mode}")?;
                }
                "5" => self.show_results()?,
                "6" => {
                    self.state.clear();
                    writeln!(self.out, "{}", "Filters cleared!".green())?;
                }
                "7" => return Ok(true),
                _ => writeln!(self.out, "{}", "Invalid choice, try again!".yellow())?,
            }
        }
    }

    /// Print every movie in the catalog.
    pub fn view_all(&mut self) -> Result<()> {
        match self.composer.run_all(&self.catalog) {
            Ok(listing) => write_listing(&mut self.out, &listing)?,
            Err(err) => write_error(&mut self.out, &err)?,
        }
        Ok(())
    }

    /// Apply the current filters and print the result.
    pub fn show_results(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}", "🎬 Filtered Results:".bold())?;
        match self.composer.run(&self.catalog, &self.state) {
            Ok(listing) => write_listing(&mut self.out, &listing)?,
            Err(err) => write_error(&mut self.out, &err)?,
        }
        Ok(())
    }

    /// Run the current filters without printing anything.
    pub fn results(&self) -> composer::Result<Listing> {
        self.composer.run(&self.catalog, &self.state)
    }

    fn choose_genres(&mut self) -> Result<()> {
        let available = match self.catalog.list_genres() {
            Ok(genres) => genres,
            Err(err) => {
                write_error(&mut self.out, &ComposeError::from(err))?;
                return Ok(());
            }
        };
        if available.is_empty() {
            writeln!(self.out, "No genres found in DB.")?;
            self.state.genres.clear();
            return Ok(());
        }

        writeln!(self.out, "\nAvailable genres:")?;
        for (i, genre) in available.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, genre)?;
        }
        writeln!(self.out, "\nYou may:")?;
        writeln!(self.out, "- Enter genre names separated by commas (e.g. Action, Comedy)")?;
        writeln!(self.out, "- OR enter indices separated by commas (e.g. 1,3)")?;
        writeln!(self.out, "- Press Enter to keep current selection")?;

        let current = if self.state.genres.is_empty() {
            "none".to_string()
        } else {
            self.state.genres.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        let Some(raw) = self.prompt(&format!("Selected genres [{current}]: "))? else {
            return Ok(());
        };

        let warnings = resolve_genres(&raw, &available).apply_to(&mut self.state.genres);
        write_warnings(&mut self.out, &warnings)?;
        Ok(())
    }

    fn choose_years(&mut self) -> Result<()> {
        let available = match self.catalog.list_years() {
            Ok(years) => years,
            Err(err) => {
                write_error(&mut self.out, &ComposeError::from(err))?;
                return Ok(());
            }
        };
        if available.is_empty() {
            writeln!(self.out, "No years found in DB.")?;
            self.state.years.clear();
            return Ok(());
        }

        let listed: Vec<String> = available.iter().map(|y| y.to_string()).collect();
        writeln!(self.out, "\nAvailable years:")?;
        writeln!(self.out, "{}", listed.join(", "))?;

        let current = if self.state.years.is_empty() {
            "none".to_string()
        } else {
            self.state
                .years
                .iter()
                .rev()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let Some(raw) = self.prompt(&format!(
            "Enter years separated by commas (current: {current}): "
        ))?
        else {
            return Ok(());
        };

        let warnings = resolve_years(&raw, &available).apply_to(&mut self.state.years);
        write_warnings(&mut self.out, &warnings)?;
        Ok(())
    }

    fn set_min_rating(&mut self) -> Result<()> {
        let Some(raw) =
            self.prompt("Enter minimum rating (e.g. 8.0) or blank to keep current: ")?
        else {
            return Ok(());
        };

        match parse_min_rating(&raw) {
            Ok(Some(floor)) => self.state.set_min_rating(Some(floor)),
            Ok(None) => {}
            Err(warning) => write_warnings(&mut self.out, &[warning])?,
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line. `None` means input ended.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
