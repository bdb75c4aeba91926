//! The admission record: the unit of analysis.
//!
//! Records mirror the nested document shape of the admissions collection
//! (`patient.name.full`, `insurance.provider`, ...). Every field is optional
//! at the type level because the store does not guarantee completeness; the
//! engine groups incomplete records under absent components instead of
//! rejecting them.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Declares a closed vocabulary field that still round-trips labels it does
/// not recognize.
///
/// Each generated enum serializes as its label string and deserializes any
/// string: known labels map to their variant, anything else is kept verbatim
/// in `Unrecognized` so one odd value never makes a whole record unreadable.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A label outside the declared vocabulary, preserved as read.
            Unrecognized(String),
        }

        impl $name {
            /// Every recognized variant, in declaration order.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            /// The label stored in the collection for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unrecognized(other) => other.as_str(),
                }
            }

            /// True unless this value fell outside the declared vocabulary.
            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                match label {
                    $($label => $name::$variant,)+
                    other => $name::Unrecognized(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match $name::from(label.as_str()) {
                    $name::Unrecognized(_) => $name::Unrecognized(label),
                    known => known,
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unrecognized(other) => other,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labelled_enum! {
    /// Patient gender as stored (lower-case labels).
    pub enum Gender {
        Male => "male",
        Female => "female",
    }
}

labelled_enum! {
    /// How the patient was admitted.
    pub enum AdmissionType {
        Emergency => "Emergency",
        Elective => "Elective",
        Urgent => "Urgent",
    }
}

labelled_enum! {
    /// Outcome of the admission's test panel.
    pub enum TestResult {
        Normal => "Normal",
        Abnormal => "Abnormal",
        Inconclusive => "Inconclusive",
    }
}

labelled_enum! {
    /// Insurance provider from the fixed provider list, or "Other".
    pub enum InsuranceProvider {
        Aetna => "Aetna",
        BlueCross => "Blue Cross",
        Cigna => "Cigna",
        UnitedHealthcare => "UnitedHealthcare",
        Medicare => "Medicare",
        Other => "Other",
    }
}

/// The patient's name. `full` is stored already lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

/// Patient demographics embedded in each admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub name: PatientName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
}

/// Insurance coverage for the admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<InsuranceProvider>,
}

/// One hospital admission.
///
/// `admission_id` is *intended* to be unique but the store does not enforce
/// it; detecting violations is one of the two detector modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_id: Option<String>,
    pub patient: Patient,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_admission: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_duration_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_type: Option<AdmissionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub insurance: Insurance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_results: Option<TestResult>,
}

impl AdmissionRecord {
    /// `patient.name.full`, the patient-identity proxy used by distinct counts.
    pub fn patient_name(&self) -> Option<&str> {
        self.patient.name.full.as_deref()
    }

    /// Calendar year (UTC) of `date_of_admission`.
    pub fn admission_year(&self) -> Option<i32> {
        self.date_of_admission.map(|d| d.year())
    }

    /// `billing_amount`, with an absent amount contributing nothing to sums.
    pub fn billing(&self) -> f64 {
        self.billing_amount.unwrap_or(0.0)
    }
}
