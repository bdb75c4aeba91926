//! Filter-then-aggregate engine.
//!
//! A run has two phases:
//!
//! 1. **Filter**: every record is tested against the predicate once; the
//!    accepted records form the filtered set, in input order.
//! 2. **Aggregate**: each selected report kind is computed over the same
//!    filtered set. Kinds share no state, so they run in parallel on the
//!    rayon pool; results are collected back in `ReportKind` order.

use rayon::prelude::*;
use tracing::{debug, info};

use admitlens_contracts::{
    record::AdmissionRecord,
    report::{Dashboard, Report, ReportKind, ReportSpec},
};
use admitlens_core::traits::Predicate;

use crate::reports;

/// Computes dashboards over an in-memory record snapshot.
///
/// ```rust,ignore
/// use admitlens_report::AggregationEngine;
///
/// let dashboard = AggregationEngine::new(ReportSpec::default())
///     .aggregate(&records, &build_predicate(&criteria)?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    spec: ReportSpec,
}

impl AggregationEngine {
    pub fn new(spec: ReportSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ReportSpec {
        &self.spec
    }

    /// Filter `records` through `predicate` and compute every selected report.
    ///
    /// Never fails: an empty or fully filtered-out input yields zero totals
    /// and empty groupings.
    pub fn aggregate(&self, records: &[AdmissionRecord], predicate: &dyn Predicate) -> Dashboard {
        let filtered: Vec<&AdmissionRecord> = records
            .par_iter()
            .filter(|r| predicate.accepts(r))
            .collect();

        info!(
            scanned_records = records.len(),
            matched_records = filtered.len(),
            "records filtered for aggregation"
        );

        let reports: Vec<Report> = self
            .spec
            .selected()
            .into_par_iter()
            .map(|kind| {
                let report = compute(kind, &filtered, self.spec.condition_limit);
                debug!(kind = kind.label(), "report computed");
                report
            })
            .collect();

        Dashboard {
            scanned_records: records.len(),
            matched_records: filtered.len(),
            reports,
        }
    }
}

/// Compute a single report kind over an already-filtered record set.
pub fn compute(kind: ReportKind, filtered: &[&AdmissionRecord], condition_limit: usize) -> Report {
    match kind {
        ReportKind::GlobalKpis => Report::GlobalKpis(reports::global_kpis(filtered)),
        ReportKind::BillingByYear => Report::BillingByYear(reports::billing_by_year(filtered)),
        ReportKind::PatientsByAgeGroup => {
            Report::PatientsByAgeGroup(reports::patients_by_age_group(filtered))
        }
        ReportKind::PatientsByGender => {
            Report::PatientsByGender(reports::patients_by_gender(filtered))
        }
        ReportKind::PatientsByCondition => Report::PatientsByCondition(
            reports::patients_by_condition(filtered, condition_limit),
        ),
        ReportKind::PatientsByAdmissionType => {
            Report::PatientsByAdmissionType(reports::patients_by_admission_type(filtered))
        }
        ReportKind::BillingByInsurance => {
            Report::BillingByInsurance(reports::billing_by_insurance(filtered))
        }
    }
}

/// One-shot form of `AggregationEngine::aggregate`.
pub fn aggregate(
    records: &[AdmissionRecord],
    predicate: &dyn Predicate,
    spec: &ReportSpec,
) -> Dashboard {
    AggregationEngine::new(spec.clone()).aggregate(records, predicate)
}
