//! Age bucketing and percentage shares.

use admitlens_contracts::report::AgeBucket;

/// The bucket `age` falls into.
///
/// Ranges are inclusive. Every age outside 13-65, including negative ages
/// and an absent age, lands in the `66+` catch-all.
pub fn age_bucket(age: Option<i32>) -> AgeBucket {
    match age {
        Some(13..=17) => AgeBucket::Age13To17,
        Some(18..=35) => AgeBucket::Age18To35,
        Some(36..=55) => AgeBucket::Age36To55,
        Some(56..=65) => AgeBucket::Age56To65,
        _ => AgeBucket::Age66Plus,
    }
}

/// `part` as a percentage of `total`, rounded to two decimals.
///
/// A zero total yields 0 rather than dividing by it.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    (part / total * 10_000.0).round() / 100.0
}
