//! # admitlens-report
//!
//! Descriptive dashboard statistics over a filtered admission snapshot.
//!
//! [`AggregationEngine`] applies a [`Predicate`](admitlens_core::traits::Predicate)
//! once, then computes the reports selected by a
//! [`ReportSpec`](admitlens_contracts::report::ReportSpec):
//!
//! - global KPIs (billing sum, distinct hospitals/patients/doctors/providers)
//! - billing by admission year
//! - distinct patients by age group, gender, condition and admission type
//! - billing by insurance provider with percentage shares
//!
//! Patients are counted by distinct full name. Two different people with the
//! same name count once; this is a known limit of the identity proxy.

pub mod buckets;
pub mod engine;
pub mod reports;

pub use buckets::{age_bucket, percentage};
pub use engine::{aggregate, compute, AggregationEngine};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use admitlens_contracts::{
        criteria::FilterCriteria,
        record::{AdmissionRecord, AdmissionType, Gender, InsuranceProvider},
        report::{AgeBucket, Report, ReportKind, ReportSpec},
    };
    use admitlens_core::traits::AcceptAll;
    use admitlens_filter::build_predicate;

    use crate::{age_bucket, aggregate, percentage, AggregationEngine};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A record for `name`, admitted on 1 June of `year`, billed `billing`.
    fn patient(name: &str, gender: Gender, year: i32, billing: f64) -> AdmissionRecord {
        let mut r = AdmissionRecord::default();
        r.patient.name.full = Some(name.to_string());
        r.patient.gender = Some(gender);
        r.date_of_admission = Some(Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap());
        r.billing_amount = Some(billing);
        r
    }

    fn with_condition(mut r: AdmissionRecord, condition: &str) -> AdmissionRecord {
        r.medical_condition = Some(condition.to_string());
        r
    }

    fn with_provider(mut r: AdmissionRecord, provider: InsuranceProvider) -> AdmissionRecord {
        r.insurance.provider = Some(provider);
        r
    }

    fn all_reports(records: &[AdmissionRecord]) -> admitlens_contracts::report::Dashboard {
        aggregate(records, &AcceptAll, &ReportSpec::default())
    }

    // ── 1. filtered scenario ──────────────────────────────────────────────────

    #[test]
    fn test_female_2022_scenario() {
        let records = vec![
            patient("ann lee", Gender::Female, 2022, 100.0),
            patient("bea kim", Gender::Female, 2022, 200.0),
            patient("carl ray", Gender::Male, 2022, 400.0),
            patient("dora fox", Gender::Female, 2021, 800.0),
            patient("eve moss", Gender::Female, 2023, 1600.0),
        ];
        let predicate =
            build_predicate(&FilterCriteria::new().gender("female").year(2022)).unwrap();

        let dashboard = aggregate(&records, &predicate, &ReportSpec::default());

        assert_eq!(dashboard.scanned_records, 5);
        assert_eq!(dashboard.matched_records, 2);
        assert_eq!(dashboard.global_kpis().unwrap().total_billing_amount, 300.0);

        match dashboard.report(ReportKind::PatientsByGender) {
            Some(Report::PatientsByGender(entries)) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].gender, Some(Gender::Female));
                assert!(entries[0].total_patient <= 2);
                assert_eq!(entries[0].percentage, 100.0);
            }
            other => panic!("expected gender report, got {:?}", other),
        }
    }

    // ── 2. empty input ────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_zero_reports() {
        let dashboard = all_reports(&[]);

        assert_eq!(dashboard.matched_records, 0);
        assert_eq!(dashboard.reports.len(), ReportKind::ALL.len());
        let kpis = dashboard.global_kpis().unwrap();
        assert_eq!(kpis.total_billing_amount, 0.0);
        assert_eq!(kpis.total_patient, 0);
        assert_eq!(kpis.total_hospital, 0);

        for report in &dashboard.reports {
            let empty = match report {
                Report::GlobalKpis(_) => true,
                Report::BillingByYear(v) => v.is_empty(),
                Report::PatientsByAgeGroup(v) => v.is_empty(),
                Report::PatientsByGender(v) => v.is_empty(),
                Report::PatientsByCondition(v) => v.is_empty(),
                Report::PatientsByAdmissionType(v) => v.is_empty(),
                Report::BillingByInsurance(v) => v.is_empty(),
            };
            assert!(empty, "expected empty grouping in {:?}", report.kind());
        }
    }

    // ── 3. age buckets ────────────────────────────────────────────────────────

    #[test]
    fn test_age_bucket_is_total() {
        assert_eq!(age_bucket(Some(5)), AgeBucket::Age66Plus);
        assert_eq!(age_bucket(Some(12)), AgeBucket::Age66Plus);
        assert_eq!(age_bucket(Some(13)), AgeBucket::Age13To17);
        assert_eq!(age_bucket(Some(17)), AgeBucket::Age13To17);
        assert_eq!(age_bucket(Some(18)), AgeBucket::Age18To35);
        assert_eq!(age_bucket(Some(35)), AgeBucket::Age18To35);
        assert_eq!(age_bucket(Some(36)), AgeBucket::Age36To55);
        assert_eq!(age_bucket(Some(55)), AgeBucket::Age36To55);
        assert_eq!(age_bucket(Some(56)), AgeBucket::Age56To65);
        assert_eq!(age_bucket(Some(65)), AgeBucket::Age56To65);
        assert_eq!(age_bucket(Some(66)), AgeBucket::Age66Plus);
        assert_eq!(age_bucket(Some(200)), AgeBucket::Age66Plus);
        assert_eq!(age_bucket(Some(-1)), AgeBucket::Age66Plus);
        assert_eq!(age_bucket(None), AgeBucket::Age66Plus);
    }

    #[test]
    fn test_age_groups_count_distinct_names_in_bucket_order() {
        let mut records = Vec::new();
        for (name, age) in [("a", 70), ("b", 14), ("b", 14), ("c", 40), ("d", 8)] {
            let mut r = patient(name, Gender::Male, 2023, 1.0);
            r.patient.age = Some(age);
            records.push(r);
        }

        let dashboard = aggregate(
            &records,
            &AcceptAll,
            &ReportSpec::only([ReportKind::PatientsByAgeGroup]),
        );
        match &dashboard.reports[..] {
            [Report::PatientsByAgeGroup(entries)] => {
                let got: Vec<(AgeBucket, usize)> =
                    entries.iter().map(|e| (e.age_group, e.total_patient)).collect();
                assert_eq!(
                    got,
                    vec![
                        (AgeBucket::Age13To17, 1),
                        (AgeBucket::Age36To55, 1),
                        (AgeBucket::Age66Plus, 2),
                    ]
                );
            }
            other => panic!("expected a single age report, got {:?}", other),
        }
    }

    // ── 4. percentages ────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_rounds_and_guards_zero() {
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(2.0, 3.0), 66.67);
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let records = vec![
            with_provider(patient("a", Gender::Male, 2023, 10.0), InsuranceProvider::Aetna),
            with_provider(patient("b", Gender::Female, 2023, 20.0), InsuranceProvider::Cigna),
            with_provider(patient("c", Gender::Female, 2023, 40.0), InsuranceProvider::Medicare),
        ];
        let dashboard = all_reports(&records);

        if let Some(Report::PatientsByGender(entries)) = dashboard.report(ReportKind::PatientsByGender)
        {
            let sum: f64 = entries.iter().map(|e| e.percentage).sum();
            assert!((sum - 100.0).abs() <= 0.1, "gender shares sum to {sum}");
        } else {
            panic!("gender report missing");
        }

        if let Some(Report::BillingByInsurance(entries)) =
            dashboard.report(ReportKind::BillingByInsurance)
        {
            let sum: f64 = entries.iter().map(|e| e.percentage).sum();
            assert!((sum - 100.0).abs() <= 0.1, "provider shares sum to {sum}");
        } else {
            panic!("insurance report missing");
        }
    }

    #[test]
    fn test_zero_billing_gives_zero_shares() {
        let records = vec![with_provider(
            patient("a", Gender::Male, 2023, 0.0),
            InsuranceProvider::Aetna,
        )];
        let dashboard = all_reports(&records);
        match dashboard.report(ReportKind::BillingByInsurance) {
            Some(Report::BillingByInsurance(entries)) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].percentage, 0.0);
            }
            other => panic!("expected insurance report, got {:?}", other),
        }
    }

    // ── 5. ordering rules ─────────────────────────────────────────────────────

    #[test]
    fn test_billing_by_year_ascending() {
        let records = vec![
            patient("a", Gender::Male, 2024, 5.0),
            patient("b", Gender::Male, 2019, 1.0),
            patient("c", Gender::Male, 2024, 5.0),
            patient("d", Gender::Male, 2021, 2.0),
        ];
        match aggregate(&records, &AcceptAll, &ReportSpec::only([ReportKind::BillingByYear]))
            .reports
            .remove(0)
        {
            Report::BillingByYear(entries) => {
                let got: Vec<(Option<i32>, f64)> = entries
                    .iter()
                    .map(|e| (e.year, e.total_billing_amount))
                    .collect();
                assert_eq!(
                    got,
                    vec![(Some(2019), 1.0), (Some(2021), 2.0), (Some(2024), 10.0)]
                );
            }
            other => panic!("expected billing by year, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_report_top_ten_with_name_tiebreak() {
        let mut records = Vec::new();
        // Twelve conditions; "c00" has 3 patients, "c01" 2, the rest 1 each.
        for i in 0..12 {
            let condition = format!("c{i:02}");
            let patients = match i {
                0 => 3,
                1 => 2,
                _ => 1,
            };
            for p in 0..patients {
                records.push(with_condition(
                    patient(&format!("p{i}-{p}"), Gender::Male, 2023, 1.0),
                    &condition,
                ));
            }
        }
        // Records in reverse so order cannot leak from input.
        records.reverse();

        match aggregate(
            &records,
            &AcceptAll,
            &ReportSpec::only([ReportKind::PatientsByCondition]),
        )
        .reports
        .remove(0)
        {
            Report::PatientsByCondition(entries) => {
                assert_eq!(entries.len(), 10);
                let names: Vec<&str> = entries
                    .iter()
                    .map(|e| e.medical_condition.as_deref().unwrap())
                    .collect();
                assert_eq!(
                    names,
                    vec!["c00", "c01", "c02", "c03", "c04", "c05", "c06", "c07", "c08", "c09"]
                );
                assert_eq!(entries[0].total_patient, 3);
            }
            other => panic!("expected condition report, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_limit_is_configurable() {
        let records = vec![
            with_condition(patient("a", Gender::Male, 2023, 1.0), "Asthma"),
            with_condition(patient("b", Gender::Male, 2023, 1.0), "Cancer"),
        ];
        let mut spec = ReportSpec::only([ReportKind::PatientsByCondition]);
        spec.condition_limit = 1;
        match AggregationEngine::new(spec).aggregate(&records, &AcceptAll).reports.remove(0) {
            Report::PatientsByCondition(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].medical_condition.as_deref(), Some("Asthma"));
            }
            other => panic!("expected condition report, got {:?}", other),
        }
    }

    #[test]
    fn test_admission_type_count_desc_then_label() {
        let typed = |name: &str, t: AdmissionType| {
            let mut r = patient(name, Gender::Male, 2023, 1.0);
            r.admission_type = Some(t);
            r
        };
        let records = vec![
            typed("a", AdmissionType::Urgent),
            typed("b", AdmissionType::Emergency),
            typed("c", AdmissionType::Elective),
            typed("d", AdmissionType::Urgent),
        ];
        match aggregate(
            &records,
            &AcceptAll,
            &ReportSpec::only([ReportKind::PatientsByAdmissionType]),
        )
        .reports
        .remove(0)
        {
            Report::PatientsByAdmissionType(entries) => {
                let got: Vec<(Option<AdmissionType>, usize)> = entries
                    .iter()
                    .map(|e| (e.admission_type.clone(), e.total_patient))
                    .collect();
                assert_eq!(
                    got,
                    vec![
                        (Some(AdmissionType::Urgent), 2),
                        (Some(AdmissionType::Elective), 1),
                        (Some(AdmissionType::Emergency), 1),
                    ]
                );
            }
            other => panic!("expected admission type report, got {:?}", other),
        }
    }

    #[test]
    fn test_insurance_total_desc_then_label() {
        let records = vec![
            with_provider(patient("a", Gender::Male, 2023, 50.0), InsuranceProvider::Medicare),
            with_provider(patient("b", Gender::Male, 2023, 50.0), InsuranceProvider::Aetna),
            with_provider(patient("c", Gender::Male, 2023, 100.0), InsuranceProvider::Cigna),
        ];
        match aggregate(
            &records,
            &AcceptAll,
            &ReportSpec::only([ReportKind::BillingByInsurance]),
        )
        .reports
        .remove(0)
        {
            Report::BillingByInsurance(entries) => {
                let got: Vec<(Option<InsuranceProvider>, f64)> = entries
                    .iter()
                    .map(|e| (e.insurance_provider.clone(), e.percentage))
                    .collect();
                assert_eq!(
                    got,
                    vec![
                        (Some(InsuranceProvider::Cigna), 50.0),
                        (Some(InsuranceProvider::Aetna), 25.0),
                        (Some(InsuranceProvider::Medicare), 25.0),
                    ]
                );
            }
            other => panic!("expected insurance report, got {:?}", other),
        }
    }

    /// Absent grouping values form their own group, ordered first.
    #[test]
    fn test_absent_gender_groups_first() {
        let mut unknown = patient("x", Gender::Male, 2023, 1.0);
        unknown.patient.gender = None;
        let records = vec![
            patient("m", Gender::Male, 2023, 1.0),
            unknown,
            patient("f", Gender::Female, 2023, 1.0),
        ];
        match aggregate(&records, &AcceptAll, &ReportSpec::only([ReportKind::PatientsByGender]))
            .reports
            .remove(0)
        {
            Report::PatientsByGender(entries) => {
                let genders: Vec<Option<Gender>> =
                    entries.iter().map(|e| e.gender.clone()).collect();
                assert_eq!(genders, vec![None, Some(Gender::Female), Some(Gender::Male)]);
            }
            other => panic!("expected gender report, got {:?}", other),
        }
    }

    // ── 6. global KPIs ────────────────────────────────────────────────────────

    #[test]
    fn test_global_kpis_count_distinct_present_values() {
        let mut a = with_provider(patient("ann", Gender::Female, 2023, 10.5), InsuranceProvider::Aetna);
        a.hospital = Some("General".to_string());
        a.doctor = Some("Dr. One".to_string());
        let mut b = with_provider(patient("ann", Gender::Female, 2023, 4.5), InsuranceProvider::Aetna);
        b.hospital = Some("General".to_string());
        b.doctor = Some("Dr. Two".to_string());
        let mut c = patient("bob", Gender::Male, 2023, 5.0);
        c.hospital = Some("St. Mary".to_string());
        c.billing_amount = None;

        let dashboard = aggregate(&[a, b, c], &AcceptAll, &ReportSpec::only([ReportKind::GlobalKpis]));
        let kpis = dashboard.global_kpis().unwrap();
        assert_eq!(kpis.total_billing_amount, 15.0);
        assert_eq!(kpis.total_patient, 2);
        assert_eq!(kpis.total_hospital, 2);
        assert_eq!(kpis.total_doctors, 2);
        assert_eq!(kpis.total_insurance_company, 1);
    }

    // ── 7. report selection ───────────────────────────────────────────────────

    #[test]
    fn test_reports_follow_kind_order_not_request_order() {
        let spec = ReportSpec::only([
            ReportKind::BillingByInsurance,
            ReportKind::GlobalKpis,
            ReportKind::BillingByInsurance,
        ]);
        let dashboard = aggregate(&[], &AcceptAll, &spec);
        let kinds: Vec<ReportKind> = dashboard.reports.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![ReportKind::GlobalKpis, ReportKind::BillingByInsurance]);
    }

    #[test]
    fn test_dashboard_serializes_tagged_reports() {
        let dashboard = aggregate(
            &[patient("a", Gender::Female, 2023, 12.0)],
            &AcceptAll,
            &ReportSpec::only([ReportKind::PatientsByGender]),
        );
        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["reports"][0]["kind"], "patients-by-gender");
        assert_eq!(json["reports"][0]["data"][0]["gender"], "female");
        assert_eq!(json["reports"][0]["data"][0]["percentage"], 100.0);
    }
}
