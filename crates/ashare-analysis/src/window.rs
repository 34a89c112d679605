//! Trailing time-window filtering.

use chrono::{Duration, NaiveDate};

use ashare_core::FinancialRecord;

/// Default trailing window, in years.
pub const DEFAULT_YEARS_BACK: u32 = 10;

/// Restricts records to the trailing window and sorts them newest first.
///
/// The window is the closed interval `[today - years_back * 365 days,
/// today]`; records dated in the future are excluded along with everything
/// older than the cutoff. The anchor date is passed in by the caller so the
/// filter stays deterministic.
#[must_use]
pub fn filter_recent(
    records: Vec<FinancialRecord>,
    years_back: u32,
    today: NaiveDate,
) -> Vec<FinancialRecord> {
    let cutoff = today - Duration::days(365 * i64::from(years_back));
    let mut kept: Vec<FinancialRecord> = records
        .into_iter()
        .filter(|r| r.report_date >= cutoff && r.report_date <= today)
        .collect();
    kept.sort_by(|a, b| b.report_date.cmp(&a.report_date));
    kept
}
