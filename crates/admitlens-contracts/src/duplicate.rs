//! Duplicate detection output types.
//!
//! A detection run produces a `DuplicateReport` holding the ordered (and
//! possibly truncated) `DuplicateGroup`s plus the true group count, so callers
//! always know how many groups exist versus how many are shown.

use serde::{Deserialize, Serialize};

use crate::record::AdmissionRecord;

/// Which notion of identity a detection run groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMode {
    /// Byte-equal `admission_id`.
    ExactIdentifier,
    /// Equal (name, admission day, hospital, room).
    CompositeKey,
}

impl DetectionMode {
    pub fn label(self) -> &'static str {
        match self {
            DetectionMode::ExactIdentifier => "admission_id",
            DetectionMode::CompositeKey => "name + admission day + hospital + room",
        }
    }
}

/// Grouping key for exact-identifier detection: `admission_id` verbatim.
///
/// Records without an identifier share the absent key, which orders first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExactKey(pub Option<String>);

/// Grouping key for composite detection.
///
/// Field order is the comparison order: name, then day, hospital, room.
/// Absent components are kept as absent, so many incomplete records can
/// cluster under one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeKey {
    /// `patient.name.full`, taken as already lower-cased.
    pub name: Option<String>,
    /// `date_of_admission` truncated to the UTC day, `YYYY-MM-DD`.
    pub day: Option<String>,
    pub hospital: Option<String>,
    pub room: Option<String>,
}

/// One key shared by more than one record.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup<K> {
    pub key: K,
    /// Number of records sharing `key`; always greater than one.
    pub count: usize,
    /// The records sharing `key`, in input order.
    pub members: Vec<AdmissionRecord>,
}

/// The result of one detection run.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport<K> {
    pub mode: DetectionMode,
    /// How many duplicate groups exist before any preview limit.
    pub total_groups: usize,
    /// True when `groups` holds fewer entries than `total_groups`.
    pub truncated: bool,
    /// Groups ordered by descending count, then ascending key.
    pub groups: Vec<DuplicateGroup<K>>,
    /// Informational note for the presentation layer, e.g. a missing
    /// uniqueness guarantee on the identifier field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl<K> DuplicateReport<K> {
    /// Number of groups actually included in this report.
    pub fn shown(&self) -> usize {
        self.groups.len()
    }

    /// True when the run found no duplicate groups at all.
    pub fn is_clean(&self) -> bool {
        self.total_groups == 0
    }
}
