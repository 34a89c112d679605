//! Latest-record summaries over the two period-class series.

use ashare_core::{AnalysisSummary, GrowthRecord, PeriodClass, PeriodSummary};

/// Builds the per-class summary from the finished growth series.
///
/// Both inputs are expected newest first; an empty series contributes no
/// summary.
#[must_use]
pub fn summarize(annual: &[GrowthRecord], half_year: &[GrowthRecord]) -> AnalysisSummary {
    AnalysisSummary {
        annual: class_summary(PeriodClass::Annual, annual),
        half_year: class_summary(PeriodClass::HalfYear, half_year),
    }
}

fn class_summary(period: PeriodClass, records: &[GrowthRecord]) -> Option<PeriodSummary> {
    let latest = records.first()?;
    Some(PeriodSummary {
        period,
        latest: latest.record(),
        count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashare_core::{FinancialRecord, Metric};
    use chrono::NaiveDate;

    fn growth(year: i32, month: u32, day: u32, revenue: f64) -> GrowthRecord {
        let mut r = FinancialRecord::new(NaiveDate::from_ymd_opt(year, month, day).unwrap());
        r.set_metric(Metric::NetRevenue, Some(revenue));
        GrowthRecord::from_record(r)
    }

    #[test]
    fn test_latest_and_count() {
        let annual = vec![growth(2023, 12, 31, 1100.0), growth(2022, 12, 31, 1000.0)];
        let summary = summarize(&annual, &[]);

        let annual_summary = summary.annual.unwrap();
        assert_eq!(annual_summary.period, PeriodClass::Annual);
        assert_eq!(annual_summary.count, 2);
        assert_eq!(annual_summary.latest.net_revenue, Some(1100.0));
        assert_eq!(
            annual_summary.latest.report_date,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );

        assert!(summary.half_year.is_none());
    }
}
