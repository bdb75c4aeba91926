//! Collaborator traits for the admitlens engine.
//!
//! - `DatasetAccessor`: the external record store (read-only)
//! - `Predicate`: a pure record filter applied before aggregation
//! - `KeyExtractor`: derives a grouping key for duplicate detection
//!
//! The engine never writes through any of them.

use std::hash::Hash;

use admitlens_contracts::{
    duplicate::DetectionMode,
    error::AdmitLensResult,
    record::AdmissionRecord,
};

/// A lazy, finite stream of records from one enumeration of a collection.
pub type RecordStream<'a> = Box<dyn Iterator<Item = AdmitLensResult<AdmissionRecord>> + 'a>;

/// Read access to a named collection of admission records.
///
/// Implementations own retrieval concerns (bounding, timeouts, retries,
/// snapshot isolation). Errors surface to the caller unchanged.
pub trait DatasetAccessor: Send + Sync {
    /// Name of the collection, used in logs and error messages.
    fn collection(&self) -> &str;

    /// Enumerate every record. Each call starts a fresh enumeration.
    ///
    /// Items may be `Err(MalformedRecord)` for a single undecodable record;
    /// the stream continues past it.
    fn records(&self) -> AdmitLensResult<RecordStream<'_>>;

    /// Exact number of records in the collection.
    fn count(&self) -> AdmitLensResult<usize>;

    /// Whether the store itself guarantees unique `admission_id`s.
    ///
    /// When false, duplicate reports carry an advisory saying so.
    fn unique_identifier_enforced(&self) -> bool {
        false
    }
}

/// A pure function from record to boolean.
///
/// Evaluation must not depend on anything beyond the record and the
/// predicate's own state (in particular not on the wall clock).
pub trait Predicate: Send + Sync {
    fn accepts(&self, record: &AdmissionRecord) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&AdmissionRecord) -> bool + Send + Sync,
{
    fn accepts(&self, record: &AdmissionRecord) -> bool {
        self(record)
    }
}

/// The open predicate: accepts every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Predicate for AcceptAll {
    fn accepts(&self, _record: &AdmissionRecord) -> bool {
        true
    }
}

/// Derives the grouping key one detection mode compares records by.
pub trait KeyExtractor: Send + Sync {
    /// Keys must be totally ordered so group output is reproducible.
    type Key: Ord + Hash + Clone;

    /// The notion of identity this extractor implements.
    fn mode(&self) -> DetectionMode;

    /// Derive the key. Never fails: absent fields become absent components.
    fn extract(&self, record: &AdmissionRecord) -> Self::Key;
}
