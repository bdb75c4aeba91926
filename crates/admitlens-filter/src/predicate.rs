//! The filter builder.
//!
//! `build_predicate` validates a sparse `FilterCriteria` and compiles it into
//! an `AdmissionFilter`:
//!
//! 1. `year`/`month` resolve to an optional `AdmissionWindow`.
//! 2. Every other present criterion becomes an exact-equality constraint on
//!    its record field.
//! 3. Absent criteria add nothing, so empty criteria accept every record.
//!
//! A record is accepted only if it satisfies the window and all constraints.
//! A record missing a constrained field never satisfies that constraint.

use tracing::debug;

use admitlens_contracts::{
    criteria::FilterCriteria,
    error::{AdmitLensError, AdmitLensResult},
    record::{AdmissionRecord, Gender, InsuranceProvider, TestResult},
};
use admitlens_core::traits::Predicate;

use crate::window::AdmissionWindow;

/// One exact-equality constraint on a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraint {
    MedicalCondition(String),
    InsuranceProvider(InsuranceProvider),
    TestResults(TestResult),
    BloodType(String),
    Gender(Gender),
}

impl FieldConstraint {
    /// The record field this constraint reads, in dotted document notation.
    pub fn field(&self) -> &'static str {
        match self {
            FieldConstraint::MedicalCondition(_) => "medical_condition",
            FieldConstraint::InsuranceProvider(_) => "insurance.provider",
            FieldConstraint::TestResults(_) => "test_results",
            FieldConstraint::BloodType(_) => "patient.blood_type",
            FieldConstraint::Gender(_) => "patient.gender",
        }
    }

    pub fn accepts(&self, record: &AdmissionRecord) -> bool {
        match self {
            FieldConstraint::MedicalCondition(want) => {
                record.medical_condition.as_deref() == Some(want.as_str())
            }
            FieldConstraint::InsuranceProvider(want) => {
                record.insurance.provider.as_ref() == Some(want)
            }
            FieldConstraint::TestResults(want) => record.test_results.as_ref() == Some(want),
            FieldConstraint::BloodType(want) => {
                record.patient.blood_type.as_deref() == Some(want.as_str())
            }
            FieldConstraint::Gender(want) => record.patient.gender.as_ref() == Some(want),
        }
    }
}

/// The compiled predicate produced by `build_predicate`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdmissionFilter {
    window: Option<AdmissionWindow>,
    constraints: Vec<FieldConstraint>,
}

impl AdmissionFilter {
    /// A filter with no window and no constraints.
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn window(&self) -> Option<&AdmissionWindow> {
        self.window.as_ref()
    }

    pub fn constraints(&self) -> &[FieldConstraint] {
        &self.constraints
    }

    /// True when this filter accepts every record.
    pub fn is_open(&self) -> bool {
        self.window.is_none() && self.constraints.is_empty()
    }
}

impl Predicate for AdmissionFilter {
    fn accepts(&self, record: &AdmissionRecord) -> bool {
        if let Some(window) = &self.window {
            match record.date_of_admission {
                Some(admitted) if window.contains(admitted) => {}
                _ => return false,
            }
        }
        self.constraints.iter().all(|c| c.accepts(record))
    }
}

/// Validate `criteria` and compile them into an `AdmissionFilter`.
///
/// Fails fast with `InvalidFilterCriteria` on a month outside 1-12, an
/// unrepresentable year, a blank free-text value, or an enumerated value
/// outside its vocabulary.
pub fn build_predicate(criteria: &FilterCriteria) -> AdmitLensResult<AdmissionFilter> {
    let window = AdmissionWindow::resolve(criteria.year, criteria.month)?;

    let mut constraints = Vec::new();
    if let Some(condition) = &criteria.medical_condition {
        constraints.push(FieldConstraint::MedicalCondition(non_blank(
            "medical_condition",
            condition,
        )?));
    }
    if let Some(provider) = &criteria.insurance_provider {
        known_label(
            "insurance_provider",
            provider.is_recognized(),
            provider.as_str(),
            InsuranceProvider::KNOWN.iter().map(|p| p.as_str()),
        )?;
        constraints.push(FieldConstraint::InsuranceProvider(provider.clone()));
    }
    if let Some(result) = &criteria.test_results {
        known_label(
            "test_results",
            result.is_recognized(),
            result.as_str(),
            TestResult::KNOWN.iter().map(|r| r.as_str()),
        )?;
        constraints.push(FieldConstraint::TestResults(result.clone()));
    }
    if let Some(blood_type) = &criteria.blood_type {
        constraints.push(FieldConstraint::BloodType(non_blank("blood_type", blood_type)?));
    }
    if let Some(gender) = &criteria.gender {
        known_label(
            "gender",
            gender.is_recognized(),
            gender.as_str(),
            Gender::KNOWN.iter().map(|g| g.as_str()),
        )?;
        constraints.push(FieldConstraint::Gender(gender.clone()));
    }

    debug!(
        window = ?window,
        constraint_count = constraints.len(),
        "filter predicate built"
    );

    Ok(AdmissionFilter {
        window,
        constraints,
    })
}

fn non_blank(field: &str, value: &str) -> AdmitLensResult<String> {
    if value.trim().is_empty() {
        return Err(AdmitLensError::InvalidFilterCriteria {
            field: field.to_string(),
            reason: "value must not be blank".to_string(),
        });
    }
    Ok(value.to_string())
}

fn known_label<'a>(
    field: &str,
    recognized: bool,
    value: &str,
    allowed: impl Iterator<Item = &'a str>,
) -> AdmitLensResult<()> {
    if recognized {
        return Ok(());
    }
    Err(AdmitLensError::InvalidFilterCriteria {
        field: field.to_string(),
        reason: format!(
            "'{value}' is not one of: {}",
            allowed.collect::<Vec<_>>().join(", ")
        ),
    })
}
