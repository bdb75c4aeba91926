//! Record decoding for stored documents.
//!
//! Decoding runs in two passes:
//!
//! 1. **Strict**: the whole document is deserialized into `AdmissionRecord`.
//! 2. **Lenient**: if that fails, each field is read on its own by dotted
//!    path. A field of the wrong type is logged and treated as absent, so
//!    one odd value never costs the rest of the record.
//!
//! Only a line that is not a JSON object at all is reported as
//! `MalformedRecord`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::warn;

use admitlens_contracts::{
    error::{AdmitLensError, AdmitLensResult},
    record::{AdmissionRecord, Insurance, Patient, PatientName},
};

/// Decode one stored line. `line` is 1-based and used for diagnostics only.
pub fn decode_record(line: usize, text: &str) -> AdmitLensResult<AdmissionRecord> {
    let doc: Value = serde_json::from_str(text).map_err(|e| AdmitLensError::MalformedRecord {
        line,
        reason: format!("not valid JSON: {}", e),
    })?;
    if !doc.is_object() {
        return Err(AdmitLensError::MalformedRecord {
            line,
            reason: "document is not a JSON object".to_string(),
        });
    }

    match AdmissionRecord::deserialize(&doc) {
        Ok(record) => Ok(record),
        Err(e) => {
            warn!(line, error = %e, "record does not match typed shape; decoding field by field");
            Ok(decode_lenient(line, &doc))
        }
    }
}

fn decode_lenient(line: usize, doc: &Value) -> AdmissionRecord {
    let reader = FieldReader { line, doc };
    AdmissionRecord {
        admission_id: reader.get("admission_id"),
        patient: Patient {
            name: PatientName {
                full: reader.get("patient.name.full"),
                given: reader.get("patient.name.given"),
                family: reader.get("patient.name.family"),
            },
            age: reader.get("patient.age"),
            gender: reader.get("patient.gender"),
            blood_type: reader.get("patient.blood_type"),
        },
        medical_condition: reader.get("medical_condition"),
        date_of_admission: reader.timestamp("date_of_admission"),
        discharge_date: reader.timestamp("discharge_date"),
        admission_duration_days: reader.get("admission_duration_days"),
        admission_type: reader.get("admission_type"),
        doctor: reader.get("doctor"),
        hospital: reader.get("hospital"),
        room_number: reader.get("room_number"),
        insurance: Insurance {
            provider: reader.get("insurance.provider"),
        },
        billing_amount: reader.get("billing_amount"),
        medication: reader.get("medication"),
        test_results: reader.get("test_results"),
    }
}

struct FieldReader<'v> {
    line: usize,
    doc: &'v Value,
}

impl<'v> FieldReader<'v> {
    fn get<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let value = resolve_path(self.doc, path)?;
        match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(line = self.line, field = path, error = %e, "field has unexpected type; treated as absent");
                None
            }
        }
    }

    /// Timestamps also accept a bare date and the `{"$date": ...}` wrapper
    /// found in exported document stores.
    fn timestamp(&self, path: &str) -> Option<DateTime<Utc>> {
        let value = resolve_path(self.doc, path)?;
        let text = match value {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("$date").and_then(Value::as_str),
            _ => None,
        };
        let parsed = text.and_then(parse_timestamp);
        if parsed.is_none() {
            warn!(line = self.line, field = path, "unreadable timestamp; treated as absent");
        }
        parsed
    }
}

/// Walk a dotted path through nested objects. A null anywhere on the path
/// counts as absent.
fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(v) if !v.is_null() => current = v,
            _ => return None,
        }
    }
    Some(current)
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
