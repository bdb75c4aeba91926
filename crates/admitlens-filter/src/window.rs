//! Admission date windows.
//!
//! Resolution rules (all bounds UTC, half-open `[start, end)`):
//!
//! - `month` set: start is the first of that month in `year`, or in 1900
//!   when no year is given; end is the first of the following month in
//!   `year`, or in 9999 when no year is given.
//! - only `year` set: the whole calendar year.
//! - neither: no window.

use chrono::{DateTime, Months, TimeZone, Utc};
use serde::Serialize;

use admitlens_contracts::error::{AdmitLensError, AdmitLensResult};

/// A half-open admission date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdmissionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AdmissionWindow {
    /// Year used for the lower bound when only a month is given.
    pub const SENTINEL_MIN_YEAR: i32 = 1900;
    /// Year used for the upper bound when only a month is given.
    pub const SENTINEL_MAX_YEAR: i32 = 9999;

    /// Resolve the window for the given year/month criteria.
    ///
    /// Returns `InvalidFilterCriteria` for a month outside 1-12 or a year
    /// the calendar cannot represent.
    pub fn resolve(year: Option<i32>, month: Option<u32>) -> AdmitLensResult<Option<Self>> {
        match (year, month) {
            (None, None) => Ok(None),
            (_, Some(month)) => {
                if !(1..=12).contains(&month) {
                    return Err(AdmitLensError::InvalidFilterCriteria {
                        field: "month".to_string(),
                        reason: format!("{month} is outside 1-12"),
                    });
                }
                let start = month_start(year.unwrap_or(Self::SENTINEL_MIN_YEAR), month)?;
                let end = month_start(year.unwrap_or(Self::SENTINEL_MAX_YEAR), month)?
                    .checked_add_months(Months::new(1))
                    .ok_or_else(|| out_of_range(year.unwrap_or(Self::SENTINEL_MAX_YEAR)))?;
                Ok(Some(Self { start, end }))
            }
            (Some(year), None) => {
                let next = year.checked_add(1).ok_or_else(|| out_of_range(year))?;
                Ok(Some(Self {
                    start: month_start(year, 1)?,
                    end: month_start(next, 1)?,
                }))
            }
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}

fn month_start(year: i32, month: u32) -> AdmitLensResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| out_of_range(year))
}

fn out_of_range(year: i32) -> AdmitLensError {
    AdmitLensError::InvalidFilterCriteria {
        field: "year".to_string(),
        reason: format!("{year} is outside the supported calendar range"),
    }
}
