//! Analysis settings loaded from TOML.
//!
//! Every section is optional; a missing section takes its defaults. The
//! `[filters]` table is validated at load time so a bad criterion fails
//! before any data is read.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use admitlens_contracts::{
    criteria::FilterCriteria,
    error::{AdmitLensError, AdmitLensResult},
    report::ReportSpec,
};

use crate::predicate::build_predicate;

/// Collection name used when `[dataset]` does not give one.
pub const DEFAULT_COLLECTION: &str = "admissions";

/// Preview limit used when `[duplicates]` does not give one.
pub const DEFAULT_PREVIEW_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetSettings {
    /// JSON Lines snapshot to analyse.
    pub path: Option<PathBuf>,
    pub collection: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: None,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuplicateSettings {
    preview_limit: Option<usize>,
}

impl DuplicateSettings {
    /// The configured preview limit; zero or unset falls back to the default.
    pub fn preview_limit(&self) -> usize {
        match self.preview_limit {
            Some(0) | None => DEFAULT_PREVIEW_LIMIT,
            Some(n) => n,
        }
    }
}

/// The full settings document.
///
/// ```rust,ignore
/// use admitlens_filter::settings::AnalysisSettings;
///
/// let settings = AnalysisSettings::from_file(Path::new("admitlens.toml"))?;
/// let predicate = build_predicate(&settings.filters)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    pub dataset: DatasetSettings,
    pub duplicates: DuplicateSettings,
    pub filters: FilterCriteria,
    pub reports: ReportSpec,
}

impl AnalysisSettings {
    /// Parse `s` as TOML.
    ///
    /// Returns `ConfigError` for malformed TOML or unknown keys, and
    /// `InvalidFilterCriteria` when the `[filters]` table does not validate.
    pub fn from_toml_str(s: &str) -> AdmitLensResult<Self> {
        let settings: AnalysisSettings =
            toml::from_str(s).map_err(|e| AdmitLensError::ConfigError {
                reason: format!("failed to parse settings TOML: {}", e),
            })?;
        build_predicate(&settings.filters)?;
        Ok(settings)
    }

    /// Read the file at `path` and parse it with `from_toml_str`.
    pub fn from_file(path: &Path) -> AdmitLensResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AdmitLensError::ConfigError {
            reason: format!("failed to read settings file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
