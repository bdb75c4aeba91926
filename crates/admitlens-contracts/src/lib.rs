//! # admitlens-contracts
//!
//! Shared types for the admitlens duplicate-detection and aggregation engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only the record model, filter criteria, output structures and
//! the error type.

pub mod criteria;
pub mod duplicate;
pub mod error;
pub mod record;
pub mod report;
pub mod run;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use criteria::FilterCriteria;
    use duplicate::{CompositeKey, ExactKey};
    use error::AdmitLensError;
    use record::{AdmissionRecord, Gender, InsuranceProvider, TestResult};
    use report::{AgeBucket, ReportKind, ReportSpec};
    use run::RunId;

    // ── Record decoding ──────────────────────────────────────────────────────

    #[test]
    fn record_decodes_nested_document_shape() {
        let doc = json!({
            "admission_id": "A1",
            "patient": {
                "name": { "full": "ada lovelace" },
                "age": 36,
                "gender": "female",
                "blood_type": "O-"
            },
            "date_of_admission": "2023-04-01T10:30:00Z",
            "hospital": "St. Mary",
            "room_number": "101",
            "insurance": { "provider": "Blue Cross" },
            "billing_amount": 1200.5,
            "test_results": "Normal"
        });

        let record: AdmissionRecord = serde_json::from_value(doc).unwrap();

        assert_eq!(record.admission_id.as_deref(), Some("A1"));
        assert_eq!(record.patient_name(), Some("ada lovelace"));
        assert_eq!(record.patient.gender, Some(Gender::Female));
        assert_eq!(record.insurance.provider, Some(InsuranceProvider::BlueCross));
        assert_eq!(record.test_results, Some(TestResult::Normal));
        assert_eq!(record.admission_year(), Some(2023));
        assert_eq!(record.billing(), 1200.5);
    }

    #[test]
    fn record_tolerates_missing_sections() {
        let record: AdmissionRecord = serde_json::from_value(json!({ "hospital": "H" })).unwrap();

        assert!(record.admission_id.is_none());
        assert!(record.patient_name().is_none());
        assert!(record.admission_year().is_none());
        assert_eq!(record.billing(), 0.0);
    }

    #[test]
    fn integer_billing_amount_is_accepted() {
        let record: AdmissionRecord =
            serde_json::from_value(json!({ "billing_amount": 300 })).unwrap();
        assert_eq!(record.billing_amount, Some(300.0));
    }

    // ── Labelled enums ───────────────────────────────────────────────────────

    #[test]
    fn unrecognized_labels_are_preserved() {
        let provider: InsuranceProvider = serde_json::from_value(json!("Kaiser")).unwrap();
        assert_eq!(provider, InsuranceProvider::Unrecognized("Kaiser".to_string()));
        assert!(!provider.is_recognized());
        assert_eq!(serde_json::to_value(&provider).unwrap(), json!("Kaiser"));
    }

    #[test]
    fn known_labels_round_trip_verbatim() {
        for provider in InsuranceProvider::KNOWN {
            let encoded = serde_json::to_value(provider).unwrap();
            assert_eq!(encoded, json!(provider.as_str()));
            let decoded: InsuranceProvider = serde_json::from_value(encoded).unwrap();
            assert_eq!(&decoded, provider);
        }
    }

    #[test]
    fn gender_labels_are_case_sensitive() {
        assert_eq!(Gender::from("female"), Gender::Female);
        assert_eq!(Gender::from("Female"), Gender::Unrecognized("Female".to_string()));
    }

    // ── FilterCriteria ───────────────────────────────────────────────────────

    #[test]
    fn default_criteria_are_empty() {
        assert!(FilterCriteria::new().is_empty());
        assert!(!FilterCriteria::new().year(2023).is_empty());
    }

    #[test]
    fn overlay_prefers_overrides_and_keeps_the_rest() {
        let base = FilterCriteria::new().year(2022).gender("male").blood_type("A+");
        let merged = base.overlay(FilterCriteria::new().gender("female").month(3));

        assert_eq!(merged.year, Some(2022));
        assert_eq!(merged.month, Some(3));
        assert_eq!(merged.gender, Some(Gender::Female));
        assert_eq!(merged.blood_type.as_deref(), Some("A+"));
    }

    #[test]
    fn criteria_reject_unknown_keys() {
        let result: Result<FilterCriteria, _> =
            serde_json::from_value(json!({ "yaer": 2023 }));
        assert!(result.is_err());
    }

    // ── Keys ─────────────────────────────────────────────────────────────────

    #[test]
    fn absent_exact_key_orders_first() {
        let mut keys = vec![ExactKey(Some("B".into())), ExactKey(None), ExactKey(Some("A".into()))];
        keys.sort();
        assert_eq!(keys[0], ExactKey(None));
        assert_eq!(keys[1], ExactKey(Some("A".into())));
    }

    #[test]
    fn composite_key_compares_component_wise() {
        let key = |name: &str, day: &str| CompositeKey {
            name: Some(name.into()),
            day: Some(day.into()),
            hospital: Some("H".into()),
            room: Some("1".into()),
        };
        assert!(key("ann", "2023-01-02") < key("bob", "2023-01-01"));
        assert!(key("ann", "2023-01-01") < key("ann", "2023-01-02"));
    }

    // ── Report types ─────────────────────────────────────────────────────────

    #[test]
    fn report_kind_parses_its_own_label() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.label().parse::<ReportKind>().unwrap(), kind);
        }
        assert!("top-doctors".parse::<ReportKind>().is_err());
    }

    #[test]
    fn report_spec_selected_is_sorted_and_unique() {
        let spec = ReportSpec::only([
            ReportKind::BillingByInsurance,
            ReportKind::GlobalKpis,
            ReportKind::BillingByInsurance,
        ]);
        assert_eq!(
            spec.selected(),
            vec![ReportKind::GlobalKpis, ReportKind::BillingByInsurance]
        );
        assert_eq!(ReportSpec::default().selected().len(), 7);
    }

    #[test]
    fn age_bucket_serializes_as_label() {
        for bucket in AgeBucket::ALL {
            assert_eq!(serde_json::to_value(bucket).unwrap(), json!(bucket.label()));
        }
    }

    // ── RunId ────────────────────────────────────────────────────────────────

    #[test]
    fn run_id_new_produces_unique_values() {
        let unique: std::collections::HashSet<String> =
            (0..100).map(|_| RunId::new().0.to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    // ── AdmitLensError display messages ──────────────────────────────────────

    #[test]
    fn error_input_access_display() {
        let err = AdmitLensError::InputAccess {
            collection: "admissions".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("admissions"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn error_invalid_filter_criteria_display() {
        let err = AdmitLensError::InvalidFilterCriteria {
            field: "month".to_string(),
            reason: "13 is outside 1-12".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid filter criterion 'month'"));
        assert!(msg.contains("outside 1-12"));
    }

    #[test]
    fn error_malformed_record_display() {
        let err = AdmitLensError::MalformedRecord {
            line: 7,
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn error_config_error_display() {
        let err = AdmitLensError::ConfigError {
            reason: "missing dataset path".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing dataset path"));
    }
}
