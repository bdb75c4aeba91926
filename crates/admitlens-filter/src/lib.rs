//! # admitlens-filter
//!
//! Turns sparse [`FilterCriteria`](admitlens_contracts::criteria::FilterCriteria)
//! into a validated record predicate, and loads analysis settings from TOML.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use admitlens_contracts::criteria::FilterCriteria;
//! use admitlens_filter::build_predicate;
//!
//! let filter = build_predicate(&FilterCriteria::new().year(2023).gender("female"))?;
//! // `filter` implements `admitlens_core::traits::Predicate`.
//! ```
//!
//! ## Date windows
//!
//! `year` and `month` resolve to a half-open UTC range. A month without a
//! year spans that month from 1900 through 9999, so it selects the month's
//! range across the whole supported calendar rather than every year's copy
//! of the month.

pub mod predicate;
pub mod settings;
pub mod window;

pub use predicate::{build_predicate, AdmissionFilter, FieldConstraint};
pub use settings::AnalysisSettings;
pub use window::AdmissionWindow;

// ── Tests ─────────────────────────────────────────────────────────────────────
