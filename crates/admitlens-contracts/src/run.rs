//! Run identity and the output envelope handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::criteria::FilterCriteria;

/// Unique identifier for one analysis run.
///
/// Stamped on every envelope so outputs saved from different snapshots can
/// be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// A run result plus the context it was computed in.
#[derive(Debug, Clone, Serialize)]
pub struct RunEnvelope<T> {
    pub run_id: RunId,
    /// Wall-clock time (UTC) the envelope was created.
    pub generated_at: DateTime<Utc>,
    /// Name of the collection the snapshot was read from.
    pub collection: String,
    /// Exact record count reported by the accessor at read time.
    pub collection_count: usize,
    /// Criteria applied, when the run filtered its input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<FilterCriteria>,
    pub result: T,
}

impl<T> RunEnvelope<T> {
    pub fn new(collection: impl Into<String>, collection_count: usize, result: T) -> Self {
        Self {
            run_id: RunId::new(),
            generated_at: Utc::now(),
            collection: collection.into(),
            collection_count,
            criteria: None,
            result,
        }
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }
}
