//! JSON Lines implementation of `DatasetAccessor`.
//!
//! One admission document per line. The file is re-opened on every
//! `records()` call, so enumeration is lazy and restartable; blank lines are
//! ignored by both `records()` and `count()`. A line that is not UTF-8 is a
//! malformed record, not a read failure.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use admitlens_contracts::{
    error::{AdmitLensError, AdmitLensResult},
    record::AdmissionRecord,
};
use admitlens_core::traits::{DatasetAccessor, RecordStream};

use crate::decode::decode_record;

/// A named collection backed by a JSON Lines file.
///
/// ```rust,ignore
/// use admitlens_store::JsonLinesDataset;
///
/// let dataset = JsonLinesDataset::new("admissions", "data/admissions.jsonl");
/// let records = admitlens_core::snapshot(&dataset)?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonLinesDataset {
    collection: String,
    path: PathBuf,
}

impl JsonLinesDataset {
    pub fn new(collection: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            collection: collection.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> AdmitLensResult<BufReader<File>> {
        let file = File::open(&self.path).map_err(|e| AdmitLensError::InputAccess {
            collection: self.collection.clone(),
            reason: format!("failed to open '{}': {}", self.path.display(), e),
        })?;
        Ok(BufReader::new(file))
    }

    fn read_error(&self, line: usize, e: std::io::Error) -> AdmitLensError {
        AdmitLensError::InputAccess {
            collection: self.collection.clone(),
            reason: format!("failed to read '{}' at line {}: {}", self.path.display(), line, e),
        }
    }
}

impl DatasetAccessor for JsonLinesDataset {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn records(&self) -> AdmitLensResult<RecordStream<'_>> {
        let reader = self.open()?;
        let stream = reader
            .split(b'\n')
            .enumerate()
            .filter_map(move |(idx, line)| {
                let line_no = idx + 1;
                let bytes = match line {
                    Ok(bytes) => bytes,
                    Err(e) => return Some(Err(self.read_error(line_no, e))),
                };
                match String::from_utf8(bytes) {
                    Ok(text) if text.trim().is_empty() => None,
                    Ok(text) => Some(decode_record(line_no, &text)),
                    Err(e) => Some(Err(AdmitLensError::MalformedRecord {
                        line: line_no,
                        reason: format!("line is not valid UTF-8: {}", e.utf8_error()),
                    })),
                }
            });
        Ok(Box::new(stream))
    }

    fn count(&self) -> AdmitLensResult<usize> {
        let mut count = 0;
        for (idx, line) in self.open()?.split(b'\n').enumerate() {
            let bytes = line.map_err(|e| self.read_error(idx + 1, e))?;
            if !is_blank(&bytes) {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Blank in the same sense `records()` skips. Undecodable bytes are never blank.
fn is_blank(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).map_or(false, |text| text.trim().is_empty())
}

/// Write `records` to `writer`, one JSON document per line.
pub fn write_jsonl<'r, W: Write>(
    records: impl IntoIterator<Item = &'r AdmissionRecord>,
    mut writer: W,
) -> AdmitLensResult<usize> {
    let mut written = 0;
    for record in records {
        write_record(&mut writer, record)?;
        written += 1;
    }
    writer.flush().map_err(write_failed)?;
    Ok(written)
}

/// Append a single record line to `writer` without flushing.
pub(crate) fn write_record<W: Write>(
    writer: &mut W,
    record: &AdmissionRecord,
) -> AdmitLensResult<()> {
    serde_json::to_writer(&mut *writer, record).map_err(|e| AdmitLensError::ImportFailed {
        reason: format!("failed to serialize record: {}", e),
    })?;
    writer.write_all(b"\n").map_err(write_failed)
}

/// Create (or truncate) the file at `path` and write `records` to it.
pub fn save_jsonl(path: &Path, records: &[AdmissionRecord]) -> AdmitLensResult<usize> {
    let file = File::create(path).map_err(|e| AdmitLensError::ImportFailed {
        reason: format!("failed to create '{}': {}", path.display(), e),
    })?;
    let written = write_jsonl(records, BufWriter::new(file))?;
    info!(path = %path.display(), written, "records saved");
    Ok(written)
}

pub(crate) fn write_failed(e: std::io::Error) -> AdmitLensError {
    AdmitLensError::ImportFailed {
        reason: format!("failed to write output: {}", e),
    }
}
