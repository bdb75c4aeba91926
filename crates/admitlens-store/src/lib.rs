//! # admitlens-store
//!
//! Reference [`DatasetAccessor`](admitlens_core::traits::DatasetAccessor)
//! implementations and the data plumbing around them:
//!
//! - [`InMemoryDataset`]: a named collection over a `Vec`
//! - [`JsonLinesDataset`]: a named collection backed by a JSON Lines file,
//!   decoded leniently line by line
//! - [`import_csv`]: normalize the public healthcare CSV into JSON Lines
//! - [`sample_admissions`]: a small fictional record set
//!
//! Neither accessor enforces unique `admission_id`s.

pub mod decode;
pub mod import;
pub mod jsonl;
pub mod memory;
pub mod sample;

pub use decode::{decode_record, parse_timestamp};
pub use import::{import_csv, import_csv_file, ImportSummary};
pub use jsonl::{save_jsonl, write_jsonl, JsonLinesDataset};
pub use memory::InMemoryDataset;
pub use sample::sample_admissions;

// ── Tests ─────────────────────────────────────────────────────────────────────
