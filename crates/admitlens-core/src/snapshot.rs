//! Point-in-time snapshot of a dataset.

use tracing::{debug, warn};

use admitlens_contracts::{
    error::{AdmitLensError, AdmitLensResult},
    record::AdmissionRecord,
};

use crate::traits::DatasetAccessor;

/// Read every record of `dataset` into memory.
///
/// A `MalformedRecord` item is logged and skipped so one bad record never
/// aborts a run; any other error is returned unchanged.
pub fn snapshot(dataset: &dyn DatasetAccessor) -> AdmitLensResult<Vec<AdmissionRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for item in dataset.records()? {
        match item {
            Ok(record) => records.push(record),
            Err(AdmitLensError::MalformedRecord { line, reason }) => {
                warn!(
                    collection = %dataset.collection(),
                    line,
                    %reason,
                    "skipping malformed record"
                );
                skipped += 1;
            }
            Err(other) => return Err(other),
        }
    }

    debug!(
        collection = %dataset.collection(),
        record_count = records.len(),
        skipped,
        "snapshot taken"
    );
    Ok(records)
}
