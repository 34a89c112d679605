//! Year-over-year growth computation.

use ashare_core::{FinancialRecord, GrowthRecord, Metric};

/// Computes year-over-year growth rates for one period-class series.
///
/// The series is evaluated in ascending date order; each record's growth is
/// measured against the immediately preceding record of the same series.
/// The oldest record has no comparator and keeps null growth fields. A
/// growth value is null whenever either side of the comparison is null or
/// the baseline is exactly zero; the undefined division is never surfaced
/// as an infinity.
///
/// The output has the same cardinality as the input and is returned sorted
/// descending by report date, the presentation order callers expect.
#[must_use]
pub fn yoy_growth(records: &[FinancialRecord]) -> Vec<GrowthRecord> {
    let mut ordered: Vec<FinancialRecord> = records.to_vec();
    ordered.sort_by_key(|r| r.report_date);

    let mut out: Vec<GrowthRecord> = Vec::with_capacity(ordered.len());
    for (i, record) in ordered.iter().enumerate() {
        let mut growth = GrowthRecord::from_record(record.clone());
        if i > 0 {
            let prior = &ordered[i - 1];
            for metric in Metric::ALL {
                growth.set_growth(metric, growth_rate(prior.metric(metric), record.metric(metric)));
            }
        }
        out.push(growth);
    }

    out.reverse();
    out
}

/// Percentage change against a prior-period baseline.
fn growth_rate(prior: Option<f64>, current: Option<f64>) -> Option<f64> {
    let prior = prior?;
    let current = current?;
    if prior == 0.0 {
        return None;
    }
    Some((current - prior) / prior * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn record(year: i32, revenue: Option<f64>, profit: Option<f64>) -> FinancialRecord {
        let mut r = FinancialRecord::new(NaiveDate::from_ymd_opt(year, 12, 31).unwrap());
        r.set_metric(Metric::NetRevenue, revenue);
        r.set_metric(Metric::NetProfit, profit);
        r
    }

    #[test]
    fn test_growth_rates() {
        let records = vec![
            record(2022, Some(1000.0), Some(200.0)),
            record(2023, Some(1100.0), Some(180.0)),
        ];

        let out = yoy_growth(&records);
        assert_eq!(out.len(), 2);

        // Newest first.
        assert_eq!(out[0].report_date.year(), 2023);
        assert!((out[0].net_revenue_yoy_growth.unwrap() - 10.0).abs() < 1e-9);
        assert!((out[0].net_profit_yoy_growth.unwrap() + 10.0).abs() < 1e-9);

        // Oldest record has no comparator.
        assert_eq!(out[1].net_revenue_yoy_growth, None);
        assert_eq!(out[1].net_profit_yoy_growth, None);
    }

    #[test]
    fn test_zero_baseline_is_null_not_infinite() {
        let records = vec![record(2022, Some(0.0), None), record(2023, Some(50.0), None)];

        let out = yoy_growth(&records);
        assert_eq!(out[0].net_revenue_yoy_growth, None);
    }

    #[test]
    fn test_null_on_either_side_propagates() {
        let records = vec![
            record(2021, Some(1000.0), None),
            record(2022, None, Some(100.0)),
            record(2023, Some(1200.0), Some(110.0)),
        ];

        let out = yoy_growth(&records);
        // 2023 vs 2022: revenue baseline null.
        assert_eq!(out[0].net_revenue_yoy_growth, None);
        assert!((out[0].net_profit_yoy_growth.unwrap() - 10.0).abs() < 1e-9);
        // 2022 vs 2021: current revenue null, profit baseline null.
        assert_eq!(out[1].net_revenue_yoy_growth, None);
        assert_eq!(out[1].net_profit_yoy_growth, None);
    }

    #[test]
    fn test_cardinality_and_order() {
        let records = vec![
            record(2023, Some(3.0), None),
            record(2021, Some(1.0), None),
            record(2022, Some(2.0), None),
        ];

        let out = yoy_growth(&records);
        assert_eq!(out.len(), 3);
        assert!(out.windows(2).all(|w| w[0].report_date > w[1].report_date));
        // 2022 vs 2021: +100%.
        assert_eq!(out[1].net_revenue_yoy_growth, Some(100.0));
    }

    #[test]
    fn test_single_record_unchanged() {
        let out = yoy_growth(&[record(2023, Some(1.0), Some(2.0))]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].net_revenue, Some(1.0));
        assert_eq!(out[0].net_revenue_yoy_growth, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(yoy_growth(&[]).is_empty());
    }
}
