//! CSV import: normalize the public healthcare admissions CSV into JSON Lines.
//!
//! Per row:
//!
//! 1. the full name is trimmed and lower-cased, then split into `given`
//!    (every word but the last) and `family` (the last word, absent for a
//!    single-word name);
//! 2. gender is lower-cased, blood type upper-cased;
//! 3. dates, integers and floats are parsed; a cell that does not parse, or
//!    is missing from a short row, is left absent;
//! 4. `admission_id` is derived from the composite components;
//! 5. `admission_duration_days` is set when both dates exist and discharge
//!    is not before admission;
//! 6. a row whose `admission_id` was already seen in this import is skipped.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use admitlens_contracts::{
    error::{AdmitLensError, AdmitLensResult},
    record::{AdmissionRecord, Insurance, Patient, PatientName},
};
use admitlens_core::keys::{admission_day, derive_admission_id};

use crate::{
    decode::parse_timestamp,
    jsonl::{write_failed, write_record},
};

/// Counters reported at the end of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Data rows read from the CSV (header excluded).
    pub rows_read: usize,
    /// Rows written after in-import de-duplication.
    pub unique_rows: usize,
    /// Rows dropped because their `admission_id` repeated an earlier row.
    pub duplicate_rows_skipped: usize,
}

/// One CSV row as it appears in the source file. Empty cells read as `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Age")]
    age: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Blood Type")]
    blood_type: Option<String>,
    #[serde(rename = "Medical Condition")]
    medical_condition: Option<String>,
    #[serde(rename = "Date of Admission")]
    date_of_admission: Option<String>,
    #[serde(rename = "Doctor")]
    doctor: Option<String>,
    #[serde(rename = "Hospital")]
    hospital: Option<String>,
    #[serde(rename = "Insurance Provider")]
    insurance_provider: Option<String>,
    #[serde(rename = "Billing Amount")]
    billing_amount: Option<String>,
    #[serde(rename = "Room Number")]
    room_number: Option<String>,
    #[serde(rename = "Admission Type")]
    admission_type: Option<String>,
    #[serde(rename = "Discharge Date")]
    discharge_date: Option<String>,
    #[serde(rename = "Medication")]
    medication: Option<String>,
    #[serde(rename = "Test Results")]
    test_results: Option<String>,
}

/// Split a normalized full name into (given, family).
fn split_name(full: &str) -> (Option<String>, Option<String>) {
    let words: Vec<&str> = full.split_whitespace().collect();
    match words.as_slice() {
        [] => (None, None),
        [only] => (Some(only.to_string()), None),
        [given @ .., family] => (Some(given.join(" ")), Some(family.to_string())),
    }
}

fn normalize(row: CsvRow) -> AdmissionRecord {
    let full = row
        .name
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty());
    let (given, family) = full.as_deref().map(split_name).unwrap_or_default();

    let date_of_admission = row.date_of_admission.as_deref().and_then(parse_timestamp);
    let discharge_date = row.discharge_date.as_deref().and_then(parse_timestamp);
    let admission_duration_days = match (date_of_admission, discharge_date) {
        (Some(admitted), Some(discharged)) => {
            Some((discharged - admitted).num_days()).filter(|days| *days >= 0)
        }
        _ => None,
    };

    let day = date_of_admission.map(admission_day);
    let admission_id = derive_admission_id(
        full.as_deref(),
        day.as_deref(),
        row.hospital.as_deref(),
        row.room_number.as_deref(),
    );

    AdmissionRecord {
        admission_id: Some(admission_id),
        patient: Patient {
            name: PatientName {
                full,
                given,
                family,
            },
            age: row.age.as_deref().and_then(|a| a.trim().parse().ok()),
            gender: row.gender.map(|g| g.to_lowercase().into()),
            blood_type: row.blood_type.map(|b| b.to_uppercase()),
        },
        medical_condition: row.medical_condition,
        date_of_admission,
        discharge_date,
        admission_duration_days,
        admission_type: row.admission_type.map(Into::into),
        doctor: row.doctor,
        hospital: row.hospital,
        room_number: row.room_number,
        insurance: Insurance {
            provider: row.insurance_provider.map(Into::into),
        },
        billing_amount: row
            .billing_amount
            .as_deref()
            .and_then(|b| b.trim().parse().ok()),
        medication: row.medication,
        test_results: row.test_results.map(Into::into),
    }
}

/// Read CSV rows from `reader`, normalize them, and write unique records to
/// `writer` as JSON Lines.
///
/// Rows with fewer cells than the header are accepted; the missing cells are
/// absent. Fails with `ImportFailed` if a row cannot be read or the output
/// cannot be written. Rows are processed in file order, so the first
/// occurrence of an identifier is the one kept.
pub fn import_csv<R: Read, W: Write>(reader: R, mut writer: W) -> AdmitLensResult<ImportSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut summary = ImportSummary::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| AdmitLensError::ImportFailed {
            reason: format!("failed to read CSV row {}: {}", idx + 1, e),
        })?;
        summary.rows_read += 1;

        let record = normalize(row);
        let id = record.admission_id.clone().unwrap_or_default();
        if !seen.insert(id) {
            debug!(row = idx + 1, "duplicate admission_id in import; row skipped");
            summary.duplicate_rows_skipped += 1;
            continue;
        }
        write_record(&mut writer, &record)?;
        summary.unique_rows += 1;
    }
    writer.flush().map_err(write_failed)?;

    info!(
        rows_read = summary.rows_read,
        unique_rows = summary.unique_rows,
        duplicate_rows_skipped = summary.duplicate_rows_skipped,
        "csv import complete"
    );
    Ok(summary)
}

/// `import_csv` from the file at `csv_path` into `out_path`.
///
/// Output goes to a sibling `.partial` file that replaces `out_path` only
/// once the import succeeds; on failure `out_path` is left untouched.
pub fn import_csv_file(csv_path: &Path, out_path: &Path) -> AdmitLensResult<ImportSummary> {
    let input = File::open(csv_path).map_err(|e| AdmitLensError::ImportFailed {
        reason: format!("failed to open '{}': {}", csv_path.display(), e),
    })?;

    let staging = staging_path(out_path);
    let output = File::create(&staging).map_err(|e| AdmitLensError::ImportFailed {
        reason: format!("failed to create '{}': {}", staging.display(), e),
    })?;

    let summary = match import_csv(input, BufWriter::new(output)) {
        Ok(summary) => summary,
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(
                    path = %staging.display(),
                    error = %cleanup,
                    "failed to remove partial import"
                );
            }
            return Err(e);
        }
    };

    fs::rename(&staging, out_path).map_err(|e| AdmitLensError::ImportFailed {
        reason: format!(
            "failed to move '{}' to '{}': {}",
            staging.display(),
            out_path.display(),
            e
        ),
    })?;
    Ok(summary)
}

fn staging_path(out_path: &Path) -> PathBuf {
    let mut name = out_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "import".into());
    name.push(".partial");
    out_path.with_file_name(name)
}
