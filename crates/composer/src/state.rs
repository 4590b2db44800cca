//! Session-scoped filter state.
//!
//! A [`FilterState`] is created when a filter session starts, mutated by
//! the user's menu actions and thrown away when the session ends. It never
//! touches the store; genres and years only have an effect if the catalog
//! actually contains them.

use catalog::{format_rating, MatchMode, Year};
use std::collections::BTreeSet;
use std::fmt;

/// The user's current genre, year, rating and match-mode selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub genres: BTreeSet<String>,
    pub years: BTreeSet<Year>,
    pub min_rating: Option<f64>,
    pub match_mode: MatchMode,
}

impl FilterState {
    /// Empty selections, ANY mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the genre selection.
    pub fn set_genres(&mut self, genres: impl IntoIterator<Item = String>) {
        self.genres = genres.into_iter().collect();
    }

    /// Replace the year selection.
    pub fn set_years(&mut self, years: impl IntoIterator<Item = Year>) {
        self.years = years.into_iter().collect();
    }

    pub fn set_min_rating(&mut self, floor: Option<f64>) {
        self.min_rating = floor;
    }

    /// Flip between ANY and ALL and return the new mode.
    pub fn toggle_match_mode(&mut self) -> MatchMode {
        self.match_mode = self.match_mode.toggled();
        self.match_mode
    }

    /// Drop genre, year and rating selections. The match mode is kept.
    pub fn clear(&mut self) {
        self.genres.clear();
        self.years.clear();
        self.min_rating = None;
    }

    /// True when no selection constrains the catalog.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.years.is_empty() && self.min_rating.is_none()
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let genres = if self.genres.is_empty() {
            "none".to_string()
        } else {
            self.genres.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        let years = if self.years.is_empty() {
            "none".to_string()
        } else {
            self.years
                .iter()
                .rev()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let rating = self
            .min_rating
            .map(format_rating)
            .unwrap_or_else(|| "none".to_string());
        let mode = match self.match_mode {
            MatchMode::Any => "ANY (movie has any selected genre)",
            MatchMode::All => "ALL (movie must have all selected genres)",
        };

        writeln!(f, " Current genres: {genres}")?;
        writeln!(f, " Current years : {years}")?;
        writeln!(f, " Minimum rating: {rating}")?;
        write!(f, " Genre match mode: {mode}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = FilterState::new();
        assert!(state.is_empty());
        assert_eq!(state.match_mode, MatchMode::Any);
    }

    #[test]
    fn test_clear_keeps_match_mode() {
        let mut state = FilterState::new();
        state.set_genres(["Action".to_string()]);
        state.set_years([1999, 2000]);
        state.set_min_rating(Some(7.0));
        assert_eq!(state.toggle_match_mode(), MatchMode::All);
        assert!(!state.is_empty());

        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.match_mode, MatchMode::All);
    }

    #[test]
    fn test_display_summary() {
        let mut state = FilterState::new();
        state.set_years([1994, 1999]);
        state.set_min_rating(Some(8.0));
        let summary = state.to_string();

        assert!(summary.contains("Current genres: none"));
        assert!(summary.contains("Current years : 1999, 1994"));
        assert!(summary.contains("Minimum rating: 8.0"));
        assert!(summary.contains("ANY"));
    }
}
