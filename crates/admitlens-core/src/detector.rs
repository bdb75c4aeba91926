//! Duplicate detection.
//!
//! The detector groups a record snapshot by a key, keeps the groups with
//! more than one member, and orders them:
//!
//!   count descending → key ascending (component-wise for composite keys)
//!
//! Keys within one run are unique, so the order is total and a repeated run
//! over the same snapshot, in any input order, yields the same group order.
//! An optional preview limit truncates the output; the true group count is
//! always reported alongside.

use std::hash::Hash;

use tracing::{debug, info};

use admitlens_contracts::{
    duplicate::{DetectionMode, DuplicateGroup, DuplicateReport},
    error::AdmitLensResult,
    record::AdmissionRecord,
};

use crate::{
    grouping::group_fold,
    snapshot::snapshot,
    traits::{DatasetAccessor, KeyExtractor},
};

/// Group `records` by `key_fn` and return every group of size > 1, ordered.
///
/// Pure: no side effects, and an empty input yields an empty result.
/// Members keep their input order.
pub fn detect<'r, K, F>(records: &'r [AdmissionRecord], key_fn: F) -> Vec<DuplicateGroup<K>>
where
    K: Ord + Hash + Clone,
    F: Fn(&AdmissionRecord) -> K,
{
    let groups = group_fold(records, key_fn, |members: &mut Vec<&'r AdmissionRecord>, r| {
        members.push(r)
    });

    let mut duplicates: Vec<DuplicateGroup<K>> = groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| DuplicateGroup {
            key,
            count: members.len(),
            members: members.into_iter().cloned().collect(),
        })
        .collect();

    duplicates.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    duplicates
}

/// Advisory attached to exact-identifier reports when the store does not
/// enforce identifier uniqueness itself.
pub const UNIQUENESS_ADVISORY: &str = "no uniqueness guarantee is enforced on the exact-identifier \
     field 'admission_id'; a unique index on admission_id would prevent new duplicates";

/// Runs detection with an optional preview limit.
///
/// ```rust,ignore
/// use admitlens_core::{DuplicateDetector, keys::ExactKeyExtractor};
///
/// let report = DuplicateDetector::with_preview_limit(20)
///     .run(&records, &ExactKeyExtractor, false);
/// println!("{} of {} groups shown", report.shown(), report.total_groups);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateDetector {
    preview_limit: Option<usize>,
}

impl DuplicateDetector {
    /// A detector that returns every group.
    pub fn new() -> Self {
        Self::default()
    }

    /// A detector that returns at most `limit` groups.
    pub fn with_preview_limit(limit: usize) -> Self {
        Self {
            preview_limit: Some(limit),
        }
    }

    pub fn preview_limit(&self) -> Option<usize> {
        self.preview_limit
    }

    /// Detect duplicates in an in-memory snapshot.
    ///
    /// `identifier_enforced` states whether the store guarantees unique
    /// identifiers; when it does not, exact-identifier reports carry
    /// `UNIQUENESS_ADVISORY`.
    pub fn run<E: KeyExtractor>(
        &self,
        records: &[AdmissionRecord],
        extractor: &E,
        identifier_enforced: bool,
    ) -> DuplicateReport<E::Key> {
        let mode = extractor.mode();
        debug!(
            mode = mode.label(),
            record_count = records.len(),
            preview_limit = ?self.preview_limit,
            "duplicate detection starting"
        );

        let mut groups = detect(records, |r| extractor.extract(r));
        let total_groups = groups.len();
        if let Some(limit) = self.preview_limit {
            groups.truncate(limit);
        }
        let truncated = groups.len() < total_groups;

        info!(
            mode = mode.label(),
            total_groups,
            shown = groups.len(),
            truncated,
            "duplicate detection complete"
        );

        let advisory = match mode {
            DetectionMode::ExactIdentifier if !identifier_enforced => {
                Some(UNIQUENESS_ADVISORY.to_string())
            }
            _ => None,
        };

        DuplicateReport {
            mode,
            total_groups,
            truncated,
            groups,
            advisory,
        }
    }

    /// Snapshot `dataset` and detect duplicates in it.
    ///
    /// Access errors from the dataset surface unchanged.
    pub fn scan<E: KeyExtractor>(
        &self,
        dataset: &dyn DatasetAccessor,
        extractor: &E,
    ) -> AdmitLensResult<DuplicateReport<E::Key>> {
        let records = snapshot(dataset)?;
        Ok(self.run(&records, extractor, dataset.unique_identifier_enforced()))
    }
}
