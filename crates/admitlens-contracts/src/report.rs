//! Aggregate report types.
//!
//! `ReportSpec` selects which reports to compute; the aggregation engine
//! answers with a `Dashboard` holding one `Report` per selected kind, in
//! `ReportKind` declaration order. Field names follow the labels the
//! dashboard has always shown (`total_patient`, `total_billing_amount`, ...).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::AdmitLensError,
    record::{AdmissionType, Gender, InsuranceProvider},
};

/// The seven report kinds. All run over the same filtered record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    GlobalKpis,
    BillingByYear,
    PatientsByAgeGroup,
    PatientsByGender,
    PatientsByCondition,
    PatientsByAdmissionType,
    BillingByInsurance,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::GlobalKpis,
        ReportKind::BillingByYear,
        ReportKind::PatientsByAgeGroup,
        ReportKind::PatientsByGender,
        ReportKind::PatientsByCondition,
        ReportKind::PatientsByAdmissionType,
        ReportKind::BillingByInsurance,
    ];

    /// The kebab-case name used in settings files and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::GlobalKpis => "global-kpis",
            ReportKind::BillingByYear => "billing-by-year",
            ReportKind::PatientsByAgeGroup => "patients-by-age-group",
            ReportKind::PatientsByGender => "patients-by-gender",
            ReportKind::PatientsByCondition => "patients-by-condition",
            ReportKind::PatientsByAdmissionType => "patients-by-admission-type",
            ReportKind::BillingByInsurance => "billing-by-insurance",
        }
    }
}

impl FromStr for ReportKind {
    type Err = AdmitLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| AdmitLensError::ConfigError {
                reason: format!("unknown report kind '{s}'"),
            })
    }
}

/// Which reports to compute, and the top-N cut for the condition report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSpec {
    pub kinds: Vec<ReportKind>,
    pub condition_limit: usize,
}

impl ReportSpec {
    pub const DEFAULT_CONDITION_LIMIT: usize = 10;

    /// Select exactly `kinds`, with the default condition limit.
    pub fn only(kinds: impl IntoIterator<Item = ReportKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            condition_limit: Self::DEFAULT_CONDITION_LIMIT,
        }
    }

    /// The selected kinds, de-duplicated, in declaration order.
    pub fn selected(&self) -> Vec<ReportKind> {
        let mut kinds = self.kinds.clone();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl Default for ReportSpec {
    fn default() -> Self {
        Self::only(ReportKind::ALL)
    }
}

/// Fixed age buckets. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "13-17")]
    Age13To17,
    #[serde(rename = "18-35")]
    Age18To35,
    #[serde(rename = "36-55")]
    Age36To55,
    #[serde(rename = "56-65")]
    Age56To65,
    /// Catch-all: every age outside the ranges above, including under 13.
    #[serde(rename = "66+")]
    Age66Plus,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Age13To17,
        AgeBucket::Age18To35,
        AgeBucket::Age36To55,
        AgeBucket::Age56To65,
        AgeBucket::Age66Plus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Age13To17 => "13-17",
            AgeBucket::Age18To35 => "18-35",
            AgeBucket::Age36To55 => "36-55",
            AgeBucket::Age56To65 => "56-65",
            AgeBucket::Age66Plus => "66+",
        }
    }
}

/// Report 1: totals across the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalKpis {
    pub total_billing_amount: f64,
    pub total_hospital: usize,
    pub total_patient: usize,
    pub total_doctors: usize,
    pub total_insurance_company: usize,
}

/// Report 2 entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBilling {
    /// Absent for records without an admission date.
    pub year: Option<i32>,
    pub total_billing_amount: f64,
}

/// Report 3 entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupPatients {
    pub age_group: AgeBucket,
    pub total_patient: usize,
}

/// Report 4 entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderPatients {
    pub gender: Option<Gender>,
    pub total_patient: usize,
    pub percentage: f64,
}

/// Report 5 entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionPatients {
    pub medical_condition: Option<String>,
    pub total_patient: usize,
}

/// Report 6 entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionTypePatients {
    pub admission_type: Option<AdmissionType>,
    pub total_patient: usize,
}

/// Report 7 entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderBilling {
    pub insurance_provider: Option<InsuranceProvider>,
    pub total_billing_amount: f64,
    pub percentage: f64,
}

/// One computed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum Report {
    GlobalKpis(GlobalKpis),
    BillingByYear(Vec<YearBilling>),
    PatientsByAgeGroup(Vec<AgeGroupPatients>),
    PatientsByGender(Vec<GenderPatients>),
    PatientsByCondition(Vec<ConditionPatients>),
    PatientsByAdmissionType(Vec<AdmissionTypePatients>),
    BillingByInsurance(Vec<ProviderBilling>),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::GlobalKpis(_) => ReportKind::GlobalKpis,
            Report::BillingByYear(_) => ReportKind::BillingByYear,
            Report::PatientsByAgeGroup(_) => ReportKind::PatientsByAgeGroup,
            Report::PatientsByGender(_) => ReportKind::PatientsByGender,
            Report::PatientsByCondition(_) => ReportKind::PatientsByCondition,
            Report::PatientsByAdmissionType(_) => ReportKind::PatientsByAdmissionType,
            Report::BillingByInsurance(_) => ReportKind::BillingByInsurance,
        }
    }
}

/// Everything one aggregation run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Records supplied to the run.
    pub scanned_records: usize,
    /// Records accepted by the predicate.
    pub matched_records: usize,
    /// One report per selected kind, in `ReportKind` order.
    pub reports: Vec<Report>,
}

impl Dashboard {
    /// The report of the given kind, if it was selected.
    pub fn report(&self, kind: ReportKind) -> Option<&Report> {
        self.reports.iter().find(|r| r.kind() == kind)
    }

    pub fn global_kpis(&self) -> Option<&GlobalKpis> {
        match self.report(ReportKind::GlobalKpis) {
            Some(Report::GlobalKpis(kpis)) => Some(kpis),
            _ => None,
        }
    }
}
