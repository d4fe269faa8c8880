//! Autocomplete suggestions for the name search box
//!
//! [`suggest`] is the pure lookup. [`SearchBox`] holds the small amount of
//! interaction state around it: what has been typed, which suggestions are
//! current, and whether the suggestion panel is open.

use serde::{Deserialize, Serialize};

use crate::doctor::DoctorRecord;

/// Upper bound on suggestions shown while typing
pub const MAX_SUGGESTIONS: usize = 3;

/// Name match shown in the autocomplete panel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchSuggestion {
    pub id: String,
    pub name: String,
}

impl From<&DoctorRecord> for SearchSuggestion {
    fn from(doctor: &DoctorRecord) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        }
    }
}

/// Up to [`MAX_SUGGESTIONS`] doctors whose name contains `query`
///
/// Matching is case-insensitive and keeps the source order. A query that is
/// blank after trimming yields nothing.
pub fn suggest(query: &str, doctors: &[DoctorRecord]) -> Vec<SearchSuggestion> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    doctors
        .iter()
        .filter(|doctor| doctor.name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(SearchSuggestion::from)
        .collect()
}

/// Search input with its suggestion panel
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    query: String,
    suggestions: Vec<SearchSuggestion>,
    open: bool,
}

impl SearchBox {
    /// Start from a query restored from the URL; the panel stays closed
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            query: initial_query.into(),
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Text changed in the input
    pub fn input(&mut self, text: &str, doctors: &[DoctorRecord]) {
        self.query = text.to_string();
        self.suggestions = suggest(text, doctors);
        self.open = !text.trim().is_empty();
    }

    /// Input regained focus
    pub fn focus(&mut self) {
        if !self.query.trim().is_empty() {
            self.open = true;
        }
    }

    /// A suggestion was picked; returns the query to search with
    pub fn select(&mut self, suggestion: &SearchSuggestion) -> String {
        self.query = suggestion.name.clone();
        self.open = false;
        self.query.clone()
    }

    /// The form was submitted; returns the query to search with
    pub fn submit(&mut self) -> String {
        self.open = false;
        self.query.clone()
    }

    /// Pointer interaction outside both the input and the panel
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Suggestions to render right now
    pub fn visible_suggestions(&self) -> &[SearchSuggestion] {
        if self.open {
            self.suggestions.as_slice()
        } else {
            &[]
        }
    }
}
