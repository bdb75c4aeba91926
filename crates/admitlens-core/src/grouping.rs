//! The reusable grouping primitive.
//!
//! Duplicate detection and every grouped report share one operation: derive
//! a key per record, then fold each record into its group's accumulator.
//! `group_fold` is that operation; the accumulators below cover the
//! reductions the engine needs (member lists, sums, distinct counts).

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use admitlens_contracts::record::AdmissionRecord;

/// Group `records` by `key`, folding each record into its group's accumulator.
///
/// Accumulators start from `A::default()`. Records are visited in input
/// order, so order-sensitive accumulators (member lists) preserve it.
pub fn group_fold<'r, I, K, A, KF, F>(records: I, key: KF, mut fold: F) -> HashMap<K, A>
where
    I: IntoIterator<Item = &'r AdmissionRecord>,
    K: Eq + Hash,
    A: Default,
    KF: Fn(&AdmissionRecord) -> K,
    F: FnMut(&mut A, &'r AdmissionRecord),
{
    let mut groups: HashMap<K, A> = HashMap::new();
    for record in records {
        fold(groups.entry(key(record)).or_default(), record);
    }
    groups
}

/// Counts distinct present values; absent values are not counted.
#[derive(Debug, Default)]
pub struct DistinctValues<'r> {
    seen: HashSet<&'r str>,
}

impl<'r> DistinctValues<'r> {
    pub fn insert(&mut self, value: Option<&'r str>) {
        if let Some(value) = value {
            self.seen.insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Running billing total for a group.
#[derive(Debug, Default, Clone, Copy)]
pub struct BillingSum(pub f64);

impl BillingSum {
    pub fn add(&mut self, record: &AdmissionRecord) {
        self.0 += record.billing();
    }
}

/// Distinct patients (by full name) within each group of `records`.
///
/// Shared by every "patients by ..." report.
pub fn distinct_patients_by<'r, I, K, KF>(records: I, key: KF) -> HashMap<K, usize>
where
    I: IntoIterator<Item = &'r AdmissionRecord>,
    K: Eq + Hash,
    KF: Fn(&AdmissionRecord) -> K,
{
    group_fold(records, key, |names: &mut DistinctValues<'r>, r| {
        names.insert(r.patient_name())
    })
    .into_iter()
    .map(|(key, names)| (key, names.len()))
    .collect()
}

/// Billing total within each group of `records`.
pub fn billing_by<'r, I, K, KF>(records: I, key: KF) -> HashMap<K, f64>
where
    I: IntoIterator<Item = &'r AdmissionRecord>,
    K: Eq + Hash,
    KF: Fn(&AdmissionRecord) -> K,
{
    group_fold(records, key, |sum: &mut BillingSum, r| sum.add(r))
        .into_iter()
        .map(|(key, sum)| (key, sum.0))
        .collect()
}
