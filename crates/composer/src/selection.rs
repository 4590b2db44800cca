//! Resolving raw user input into genre, year and rating selections.
//!
//! Input arrives as one comma-separated line per prompt. Resolution never
//! fails as a whole: each token that cannot be used is dropped, logged and
//! reported back as a [`TokenWarning`], and the remaining tokens still count.
//!
//! ## Index mode vs name mode (genres)
//! The decision is made once per batch, not per token:
//! - every token is a plain unsigned integer ⇒ all of them are 1-based
//!   indices into the displayed candidate list
//! - otherwise ⇒ every token is a genre name (so in `"1, Comedy"` the
//!   `"1"` is looked up as a name, and fails)
//!
//! A genre literally named with digits (say `"90s"`) is still a name, but a
//! batch made only of digit tokens is always read as indices.

use crate::error::TokenWarning;
use catalog::Year;
use std::collections::HashMap;
use tracing::warn;

/// Result of a prompt: keep the current value, or replace it.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    /// Blank entry: leave the current selection as it is
    Keep,
    /// Replace the current selection (possibly with an empty one)
    Resolved(Resolution<T>),
}

impl<T> Selection<T> {
    /// Apply the selection to `current`, returning any warnings produced.
    pub fn apply_to<C: FromIterator<T>>(self, current: &mut C) -> Vec<TokenWarning> {
        match self {
            Selection::Keep => Vec::new(),
            Selection::Resolved(resolution) => {
                *current = resolution.values.into_iter().collect();
                resolution.warnings
            }
        }
    }
}

/// Values resolved from one batch of tokens, plus what was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub values: Vec<T>,
    pub warnings: Vec<TokenWarning>,
}

impl<T: PartialEq> Resolution<T> {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Keep the first occurrence of each value.
    fn push(&mut self, value: T) {
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    fn drop_token(&mut self, warning: TokenWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Split a raw entry on commas, trimming and dropping empty tokens.
pub fn split_tokens(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// True for tokens made only of ASCII digits.
fn is_index_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve a genre entry against the displayed genre list.
///
/// # Arguments
/// * `raw` - The user's entry, e.g. `"1,3"` or `"action, Drama"`
/// * `candidates` - Genre names exactly as displayed (and numbered from 1)
///
/// # Returns
/// * `Selection::Keep` for a blank entry
/// * `Selection::Resolved` with canonically-cased names otherwise
pub fn resolve_genres(raw: &str, candidates: &[String]) -> Selection<String> {
    if raw.trim().is_empty() {
        return Selection::Keep;
    }

    let tokens = split_tokens(raw);
    let mut resolution = Resolution::new();

    if !tokens.is_empty() && tokens.iter().all(|t| is_index_token(t)) {
        for token in tokens {
            match lookup_index(token, candidates) {
                Some(name) => resolution.push(name.clone()),
                None => resolution.drop_token(TokenWarning::IndexOutOfRange {
                    token: token.to_string(),
                    len: candidates.len(),
                }),
            }
        }
    } else {
        // Later duplicates win, same as building the map from the list in order
        let by_folded: HashMap<String, &String> = candidates
            .iter()
            .map(|name| (name.to_lowercase(), name))
            .collect();

        for token in tokens {
            match by_folded.get(&token.to_lowercase()) {
                Some(&name) => resolution.push(name.clone()),
                None => resolution.drop_token(TokenWarning::UnknownGenre(token.to_string())),
            }
        }
    }

    Selection::Resolved(resolution)
}

fn lookup_index<'a>(token: &str, candidates: &'a [String]) -> Option<&'a String> {
    // Overflowing indices are simply out of range
    let index: usize = token.parse().ok()?;
    index.checked_sub(1).and_then(|i| candidates.get(i))
}

/// Resolve a year entry against the years present in the catalog.
///
/// Every token is read as a literal year: non-integer tokens and years no
/// movie has are dropped with a warning.
pub fn resolve_years(raw: &str, available: &[Year]) -> Selection<Year> {
    if raw.trim().is_empty() {
        return Selection::Keep;
    }

    let mut resolution = Resolution::new();
    for token in split_tokens(raw) {
        if !is_index_token(token) {
            resolution.drop_token(TokenWarning::InvalidYear(token.to_string()));
            continue;
        }
        match token.parse::<Year>() {
            Ok(year) if available.contains(&year) => resolution.push(year),
            _ => resolution.drop_token(TokenWarning::UnknownYear(token.to_string())),
        }
    }

    Selection::Resolved(resolution)
}

/// Parse a minimum-rating entry.
///
/// Blank keeps the current floor. Anything that is not a finite number is
/// rejected with a warning and also keeps the current floor.
pub fn parse_min_rating(raw: &str) -> Result<Option<f64>, TokenWarning> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => {
            let warning = TokenWarning::InvalidRating(raw.to_string());
            warn!("{warning}");
            Err(warning)
        }
    }
}
