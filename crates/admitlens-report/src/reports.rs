//! The seven report computations.
//!
//! Each function takes the already-filtered record set and is independent of
//! the others. Ordering rules per report:
//!
//! | report                | order                                   |
//! |-----------------------|-----------------------------------------|
//! | billing by year       | year ascending                          |
//! | patients by age group | fixed bucket order                      |
//! | patients by gender    | gender label ascending                  |
//! | patients by condition | count desc, then condition asc; top N   |
//! | patients by adm. type | count desc, then type label asc         |
//! | billing by insurance  | total desc, then provider label asc     |
//!
//! An absent grouping value forms its own group and sorts before every
//! present label.

use admitlens_contracts::{
    record::AdmissionRecord,
    report::{
        AdmissionTypePatients, AgeGroupPatients, ConditionPatients, GenderPatients,
        GlobalKpis, ProviderBilling, YearBilling,
    },
};
use admitlens_core::grouping::{billing_by, distinct_patients_by, DistinctValues};

use crate::buckets::{age_bucket, percentage};

pub fn global_kpis(records: &[&AdmissionRecord]) -> GlobalKpis {
    let mut hospitals = DistinctValues::default();
    let mut patients = DistinctValues::default();
    let mut doctors = DistinctValues::default();
    let mut providers = DistinctValues::default();
    let mut total_billing_amount = 0.0;

    for record in records {
        total_billing_amount += record.billing();
        hospitals.insert(record.hospital.as_deref());
        patients.insert(record.patient_name());
        doctors.insert(record.doctor.as_deref());
        providers.insert(record.insurance.provider.as_ref().map(|p| p.as_str()));
    }

    GlobalKpis {
        total_billing_amount,
        total_hospital: hospitals.len(),
        total_patient: patients.len(),
        total_doctors: doctors.len(),
        total_insurance_company: providers.len(),
    }
}

pub fn billing_by_year(records: &[&AdmissionRecord]) -> Vec<YearBilling> {
    let mut entries: Vec<YearBilling> = billing_by(records.iter().copied(), |r| r.admission_year())
        .into_iter()
        .map(|(year, total_billing_amount)| YearBilling {
            year,
            total_billing_amount,
        })
        .collect();
    entries.sort_by_key(|e| e.year);
    entries
}

/// Distinct patients per age bucket. Only buckets with records appear.
pub fn patients_by_age_group(records: &[&AdmissionRecord]) -> Vec<AgeGroupPatients> {
    let mut entries: Vec<AgeGroupPatients> =
        distinct_patients_by(records.iter().copied(), |r| age_bucket(r.patient.age))
            .into_iter()
            .map(|(age_group, total_patient)| AgeGroupPatients {
                age_group,
                total_patient,
            })
            .collect();
    entries.sort_by_key(|e| e.age_group);
    entries
}

/// Distinct patients per gender, with each group's share of the summed
/// group counts.
pub fn patients_by_gender(records: &[&AdmissionRecord]) -> Vec<GenderPatients> {
    let counts = distinct_patients_by(records.iter().copied(), |r| r.patient.gender.clone());
    let total: usize = counts.values().sum();

    let mut entries: Vec<GenderPatients> = counts
        .into_iter()
        .map(|(gender, total_patient)| GenderPatients {
            gender,
            total_patient,
            percentage: percentage(total_patient as f64, total as f64),
        })
        .collect();
    entries.sort_by(|a, b| {
        let label = |e: &GenderPatients| e.gender.as_ref().map(|g| g.as_str().to_string());
        label(a).cmp(&label(b))
    });
    entries
}

/// The `limit` conditions with the most distinct patients.
pub fn patients_by_condition(records: &[&AdmissionRecord], limit: usize) -> Vec<ConditionPatients> {
    let mut entries: Vec<ConditionPatients> =
        distinct_patients_by(records.iter().copied(), |r| r.medical_condition.clone())
            .into_iter()
            .map(|(medical_condition, total_patient)| ConditionPatients {
                medical_condition,
                total_patient,
            })
            .collect();
    entries.sort_by(|a, b| {
        b.total_patient
            .cmp(&a.total_patient)
            .then_with(|| a.medical_condition.cmp(&b.medical_condition))
    });
    entries.truncate(limit);
    entries
}

pub fn patients_by_admission_type(records: &[&AdmissionRecord]) -> Vec<AdmissionTypePatients> {
    let mut entries: Vec<AdmissionTypePatients> =
        distinct_patients_by(records.iter().copied(), |r| r.admission_type.clone())
            .into_iter()
            .map(|(admission_type, total_patient)| AdmissionTypePatients {
                admission_type,
                total_patient,
            })
            .collect();
    entries.sort_by(|a, b| {
        let label = |e: &AdmissionTypePatients| {
            e.admission_type.as_ref().map(|t| t.as_str().to_string())
        };
        b.total_patient
            .cmp(&a.total_patient)
            .then_with(|| label(a).cmp(&label(b)))
    });
    entries
}

/// Billing per provider, with each provider's share of the grand total.
pub fn billing_by_insurance(records: &[&AdmissionRecord]) -> Vec<ProviderBilling> {
    let totals = billing_by(records.iter().copied(), |r| r.insurance.provider.clone());
    let grand_total: f64 = records.iter().map(|r| r.billing()).sum();

    let mut entries: Vec<ProviderBilling> = totals
        .into_iter()
        .map(|(insurance_provider, total_billing_amount)| ProviderBilling {
            insurance_provider,
            total_billing_amount,
            percentage: percentage(total_billing_amount, grand_total),
        })
        .collect();
    entries.sort_by(|a, b| {
        let label = |e: &ProviderBilling| {
            e.insurance_provider.as_ref().map(|p| p.as_str().to_string())
        };
        b.total_billing_amount
            .total_cmp(&a.total_billing_amount)
            .then_with(|| label(a).cmp(&label(b)))
    });
    entries
}
