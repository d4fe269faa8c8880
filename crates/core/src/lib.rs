//! Core library for docfinder
//!
//! This crate implements the **Functional Core** of the docfinder application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The docfinder project uses a two-crate architecture:
//!
//! - **`docfinder_core`** (this crate): Pure data model and transformations, zero I/O
//! - **`docfinder`**: HTTP fetch, CLI and terminal rendering (the Imperative Shell)
//!
//! Every function here is deterministic and can be tested with fixture data,
//! no HTTP and no mocking. The shell fetches the doctor list once and then
//! hands it, together with an explicit [`filter::FilterState`], to these
//! functions.
//!
//! # Module Organization
//!
//! - [`doctor`]: Doctor records and normalization of the loosely-typed payload
//! - [`filter`]: Filter state, toggles and the inclusion predicate
//! - [`sort`]: Fee / experience comparator
//! - [`suggest`]: Autocomplete suggestions and the search box state
//! - [`query`]: URL query string encoding of the filter state
//! - [`listing`]: The full pipeline, card view-models and the specialty catalog
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use docfinder_core::doctor::normalize_doctors;
//! use docfinder_core::filter::{FilterState, SortKey};
//! use docfinder_core::listing::build_listing;
//!
//! let doctors = normalize_doctors(&payload)?;
//! let mut filters = FilterState::default();
//! filters.toggle_sort(SortKey::Fees);
//!
//! let listing = build_listing(&doctors, &filters);
//! println!("{}", listing.heading);
//! ```

pub mod doctor;
pub mod filter;
pub mod listing;
pub mod query;
pub mod sort;
pub mod suggest;
