//! Shareable URL query string for a [`FilterState`]
//!
//! Parameters: `search`, `mode` (`Video Consult` | `In Clinic`), repeated
//! `specialty`, and `sort` (`fees` | `experience`). Absent parameters mean
//! "no constraint".

use crate::filter::{ConsultationMode, FilterState, SortKey};

const SEARCH: &str = "search";
const MODE: &str = "mode";
const SPECIALTY: &str = "specialty";
const SORT: &str = "sort";

/// Encode the filter state as a query string without the leading `?`
///
/// Every active parameter is written, in a fixed order; inactive ones are
/// omitted. An all-default state encodes to the empty string.
pub fn encode_query(filters: &FilterState) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();

    if !filters.search_query.is_empty() {
        pairs.push((SEARCH, filters.search_query.as_str()));
    }
    if let Some(mode) = filters.consultation_mode {
        pairs.push((MODE, mode.as_str()));
    }
    for specialty in &filters.specialties {
        pairs.push((SPECIALTY, specialty.as_str()));
    }
    if let Some(sort) = filters.sort_by {
        pairs.push((SORT, sort.as_str()));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a query string back into a filter state
///
/// Accepts an optional leading `?` and `+` for spaces. Unknown keys,
/// undecodable pairs and unrecognized `mode`/`sort` values are ignored;
/// repeated specialties collapse to their first occurrence. For single-valued
/// keys the last occurrence wins.
pub fn decode_query(query: &str) -> FilterState {
    let mut filters = FilterState::default();
    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (decode_component(key), decode_component(value)) else {
            continue;
        };

        match key.as_str() {
            SEARCH => filters.search_query = value,
            MODE => filters.consultation_mode = ConsultationMode::from_label(&value),
            SPECIALTY => {
                if !filters.specialties.contains(&value) {
                    filters.specialties.push(value);
                }
            }
            SORT => filters.sort_by = SortKey::from_label(&value),
            _ => {}
        }
    }

    filters
}

fn decode_component(component: &str) -> Option<String> {
    urlencoding::decode(&component.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}
