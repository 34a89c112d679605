//! Period classification of statement records.

use chrono::Datelike;

use ashare_core::{FinancialRecord, PeriodClass};

/// Records partitioned by reporting period class.
///
/// The partition is strict: a record lands in at most one series, and
/// records dated outside June and December land in neither. Each series
/// keeps the relative order of the input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedRecords {
    /// Fiscal year-end statements (December).
    pub annual: Vec<FinancialRecord>,
    /// Mid-year statements (June).
    pub half_year: Vec<FinancialRecord>,
}

/// Partitions records into annual and half-year series by report month.
#[must_use]
pub fn classify_periods(records: &[FinancialRecord]) -> ClassifiedRecords {
    let mut classified = ClassifiedRecords::default();
    for record in records {
        match PeriodClass::from_month(record.report_date.month()) {
            Some(PeriodClass::Annual) => classified.annual.push(record.clone()),
            Some(PeriodClass::HalfYear) => classified.half_year.push(record.clone()),
            None => {}
        }
    }
    classified
}
