//! Grouping key derivation.
//!
//! Two notions of identity:
//!
//! - exact: `admission_id` verbatim; records collide iff the identifiers are
//!   byte-equal.
//! - composite: (full name, admission day in UTC, hospital, room); records
//!   collide iff all four components are equal. The name is taken as stored
//!   (already lower-cased at import), hospital and room verbatim.
//!
//! `derive_admission_id` hashes the same four components, which is how the
//! importer assigns identifiers in the first place.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use admitlens_contracts::{
    duplicate::{CompositeKey, DetectionMode, ExactKey},
    record::AdmissionRecord,
};

use crate::traits::KeyExtractor;

/// The exact-identifier key of `record`.
pub fn exact_key(record: &AdmissionRecord) -> ExactKey {
    ExactKey(record.admission_id.clone())
}

/// The composite logical key of `record`.
///
/// Missing components stay absent rather than failing, so a record with no
/// name and no date still lands in a (possibly crowded) group.
pub fn composite_key(record: &AdmissionRecord) -> CompositeKey {
    CompositeKey {
        name: record.patient.name.full.clone(),
        day: record.date_of_admission.map(admission_day),
        hospital: record.hospital.clone(),
        room: record.room_number.clone(),
    }
}

/// Truncate a timestamp to its UTC calendar day, formatted `YYYY-MM-DD`.
pub fn admission_day(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Deterministic admission identifier: lowercase hex SHA-256 over the
/// composite components.
///
/// Hash input is the four components joined with `|`, each trimmed, with
/// name, hospital and room lower-cased. Absent components hash as empty.
pub fn derive_admission_id(
    full_name: Option<&str>,
    day: Option<&str>,
    hospital: Option<&str>,
    room: Option<&str>,
) -> String {
    let lowered = |part: Option<&str>| part.unwrap_or_default().trim().to_lowercase();
    let key = [
        lowered(full_name),
        day.unwrap_or_default().trim().to_string(),
        lowered(hospital),
        lowered(room),
    ]
    .join("|");

    hex::encode(Sha256::digest(key.as_bytes()))
}

/// `KeyExtractor` for exact-identifier detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactKeyExtractor;

impl KeyExtractor for ExactKeyExtractor {
    type Key = ExactKey;

    fn mode(&self) -> DetectionMode {
        DetectionMode::ExactIdentifier
    }

    fn extract(&self, record: &AdmissionRecord) -> ExactKey {
        exact_key(record)
    }
}

/// `KeyExtractor` for composite-key detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeKeyExtractor;

impl KeyExtractor for CompositeKeyExtractor {
    type Key = CompositeKey;

    fn mode(&self) -> DetectionMode {
        DetectionMode::CompositeKey
    }

    fn extract(&self, record: &AdmissionRecord) -> CompositeKey {
        composite_key(record)
    }
}
