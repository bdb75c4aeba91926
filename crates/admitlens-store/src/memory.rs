//! In-memory implementation of `DatasetAccessor`.
//!
//! `InMemoryDataset` is the reference accessor: a named collection over a
//! `Vec<AdmissionRecord>`. Enumeration clones records out of the vector, so
//! every call to `records()` sees the same snapshot.

use admitlens_contracts::{error::AdmitLensResult, record::AdmissionRecord};
use admitlens_core::traits::{DatasetAccessor, RecordStream};

/// A named collection held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    collection: String,
    records: Vec<AdmissionRecord>,
}

impl InMemoryDataset {
    pub fn new(collection: impl Into<String>, records: Vec<AdmissionRecord>) -> Self {
        Self {
            collection: collection.into(),
            records,
        }
    }

    /// Append a record to the collection.
    pub fn push(&mut self, record: AdmissionRecord) {
        self.records.push(record);
    }

    pub fn as_slice(&self) -> &[AdmissionRecord] {
        &self.records
    }
}

impl DatasetAccessor for InMemoryDataset {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn records(&self) -> AdmitLensResult<RecordStream<'_>> {
        Ok(Box::new(self.records.iter().cloned().map(Ok)))
    }

    fn count(&self) -> AdmitLensResult<usize> {
        Ok(self.records.len())
    }
}
