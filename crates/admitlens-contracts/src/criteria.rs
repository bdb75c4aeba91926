//! Sparse filter criteria.
//!
//! `FilterCriteria` is the typed replacement for hand-built query documents:
//! every field is optional and an absent field imposes no constraint. The
//! filter builder in `admitlens-filter` validates the values and turns them
//! into a predicate; this type carries no logic of its own.

use serde::{Deserialize, Serialize};

use crate::record::{Gender, InsuranceProvider, TestResult};

/// Optional constraints applied before aggregation.
///
/// Built with the chained setters or deserialized from the `[filters]` table
/// of the analysis settings:
///
/// ```toml
/// [filters]
/// year = 2023
/// gender = "female"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// 1-12. Meaningful with or without `year`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<InsuranceProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_results: Option<TestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl FilterCriteria {
    /// Criteria with no constraints; the resulting predicate accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn medical_condition(mut self, condition: impl Into<String>) -> Self {
        self.medical_condition = Some(condition.into());
        self
    }

    pub fn insurance_provider(mut self, provider: impl Into<InsuranceProvider>) -> Self {
        self.insurance_provider = Some(provider.into());
        self
    }

    pub fn test_results(mut self, result: impl Into<TestResult>) -> Self {
        self.test_results = Some(result.into());
        self
    }

    pub fn blood_type(mut self, blood_type: impl Into<String>) -> Self {
        self.blood_type = Some(blood_type.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<Gender>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Return `self` with every criterion that `overrides` sets replaced.
    ///
    /// Used to layer command-line flags over criteria read from settings.
    pub fn overlay(self, overrides: FilterCriteria) -> Self {
        Self {
            year: overrides.year.or(self.year),
            month: overrides.month.or(self.month),
            medical_condition: overrides.medical_condition.or(self.medical_condition),
            insurance_provider: overrides.insurance_provider.or(self.insurance_provider),
            test_results: overrides.test_results.or(self.test_results),
            blood_type: overrides.blood_type.or(self.blood_type),
            gender: overrides.gender.or(self.gender),
        }
    }
}
