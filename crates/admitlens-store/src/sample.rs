//! Fictional sample admissions for demos and tests.
//!
//! All data in this module is hardcoded and fictional. The set is small but
//! exercises every report dimension and contains exactly one duplicate group
//! per detection mode:
//!
//! - exact: `ruth okafor`'s admission was re-keyed into a second row with a
//!   different room but the same `admission_id`;
//! - composite: `liam novak`'s admission was entered twice under two
//!   different identifiers.

use chrono::{TimeZone, Utc};

use admitlens_contracts::record::{
    AdmissionRecord, AdmissionType, Gender, Insurance, InsuranceProvider, Patient, PatientName,
    TestResult,
};
use admitlens_core::keys::{admission_day, derive_admission_id};

struct Visit {
    name: &'static str,
    age: i32,
    gender: Gender,
    blood_type: &'static str,
    condition: &'static str,
    admitted: (i32, u32, u32),
    stay_days: i64,
    admission_type: AdmissionType,
    doctor: &'static str,
    hospital: &'static str,
    room: &'static str,
    provider: InsuranceProvider,
    billing: f64,
    medication: &'static str,
    test_results: TestResult,
}

impl Visit {
    fn into_record(self) -> AdmissionRecord {
        let (y, m, d) = self.admitted;
        let date_of_admission = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single();
        let discharge_date = date_of_admission.map(|a| a + chrono::Duration::days(self.stay_days));
        let day = date_of_admission.map(admission_day);

        let mut words: Vec<&str> = self.name.split_whitespace().collect();
        let family = words.pop().map(str::to_string);
        let given = Some(words.join(" ")).filter(|g| !g.is_empty());

        AdmissionRecord {
            admission_id: Some(derive_admission_id(
                Some(self.name),
                day.as_deref(),
                Some(self.hospital),
                Some(self.room),
            )),
            patient: Patient {
                name: PatientName {
                    full: Some(self.name.to_string()),
                    given,
                    family,
                },
                age: Some(self.age),
                gender: Some(self.gender),
                blood_type: Some(self.blood_type.to_string()),
            },
            medical_condition: Some(self.condition.to_string()),
            date_of_admission,
            discharge_date,
            admission_duration_days: Some(self.stay_days),
            admission_type: Some(self.admission_type),
            doctor: Some(self.doctor.to_string()),
            hospital: Some(self.hospital.to_string()),
            room_number: Some(self.room.to_string()),
            insurance: Insurance {
                provider: Some(self.provider),
            },
            billing_amount: Some(self.billing),
            medication: Some(self.medication.to_string()),
            test_results: Some(self.test_results),
        }
    }
}

/// The sample admission set.
pub fn sample_admissions() -> Vec<AdmissionRecord> {
    let visits = vec![
        Visit {
            name: "ruth okafor",
            age: 62,
            gender: Gender::Female,
            blood_type: "A+",
            condition: "Diabetes",
            admitted: (2022, 3, 14),
            stay_days: 6,
            admission_type: AdmissionType::Emergency,
            doctor: "Dr. Hale",
            hospital: "Northgate General",
            room: "112",
            provider: InsuranceProvider::Medicare,
            billing: 18250.75,
            medication: "Metformin",
            test_results: TestResult::Abnormal,
        },
        Visit {
            name: "liam novak",
            age: 34,
            gender: Gender::Male,
            blood_type: "O-",
            condition: "Asthma",
            admitted: (2022, 7, 2),
            stay_days: 3,
            admission_type: AdmissionType::Urgent,
            doctor: "Dr. Imani",
            hospital: "Riverside Clinic",
            room: "204",
            provider: InsuranceProvider::Aetna,
            billing: 4120.00,
            medication: "Albuterol",
            test_results: TestResult::Normal,
        },
        Visit {
            name: "mei tanaka",
            age: 15,
            gender: Gender::Female,
            blood_type: "B+",
            condition: "Asthma",
            admitted: (2023, 1, 20),
            stay_days: 2,
            admission_type: AdmissionType::Elective,
            doctor: "Dr. Imani",
            hospital: "Riverside Clinic",
            room: "118",
            provider: InsuranceProvider::BlueCross,
            billing: 2890.40,
            medication: "Budesonide",
            test_results: TestResult::Normal,
        },
        Visit {
            name: "omar haddad",
            age: 47,
            gender: Gender::Male,
            blood_type: "AB+",
            condition: "Hypertension",
            admitted: (2023, 5, 9),
            stay_days: 4,
            admission_type: AdmissionType::Emergency,
            doctor: "Dr. Hale",
            hospital: "Northgate General",
            room: "305",
            provider: InsuranceProvider::Cigna,
            billing: 9640.10,
            medication: "Lisinopril",
            test_results: TestResult::Inconclusive,
        },
        Visit {
            name: "sofia reyes",
            age: 71,
            gender: Gender::Female,
            blood_type: "O+",
            condition: "Arthritis",
            admitted: (2023, 9, 27),
            stay_days: 9,
            admission_type: AdmissionType::Elective,
            doctor: "Dr. Brandt",
            hospital: "Lakeside Medical",
            room: "401",
            provider: InsuranceProvider::UnitedHealthcare,
            billing: 22710.00,
            medication: "Ibuprofen",
            test_results: TestResult::Abnormal,
        },
        Visit {
            name: "jonas berg",
            age: 29,
            gender: Gender::Male,
            blood_type: "A-",
            condition: "Obesity",
            admitted: (2024, 2, 11),
            stay_days: 1,
            admission_type: AdmissionType::Urgent,
            doctor: "Dr. Brandt",
            hospital: "Lakeside Medical",
            room: "150",
            provider: InsuranceProvider::Other,
            billing: 1575.25,
            medication: "Paracetamol",
            test_results: TestResult::Normal,
        },
    ];

    let mut records: Vec<AdmissionRecord> = visits.into_iter().map(Visit::into_record).collect();

    // Same admission_id, re-keyed with a different room.
    let mut rekeyed = records[0].clone();
    rekeyed.room_number = Some("114".to_string());
    records.push(rekeyed);

    // Same admission, entered again under a hand-assigned identifier.
    let mut reentered = records[1].clone();
    reentered.admission_id = Some("manual-0042".to_string());
    records.push(reentered);

    records
}
