//! # admitlens-core
//!
//! The grouping and duplicate-detection half of the admitlens engine.
//!
//! This crate provides:
//! - The collaborator traits (`DatasetAccessor`, `Predicate`, `KeyExtractor`)
//! - `group_fold`, the one grouping primitive every detector and report uses
//! - Exact and composite key extraction, plus deterministic identifier hashing
//! - The `DuplicateDetector`, with ordering and preview truncation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use admitlens_core::{DuplicateDetector, keys::{CompositeKeyExtractor, ExactKeyExtractor}};
//!
//! let detector = DuplicateDetector::with_preview_limit(20);
//! let by_id = detector.scan(&dataset, &ExactKeyExtractor)?;
//! let by_composite = detector.scan(&dataset, &CompositeKeyExtractor)?;
//! ```

pub mod detector;
pub mod grouping;
pub mod keys;
pub mod snapshot;
pub mod traits;

pub use detector::{detect, DuplicateDetector};
pub use snapshot::snapshot;

// ── Tests ─────────────────────────────────────────────────────────────────────
