#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Normalization and growth-rate pipeline for A-share profit statements.
//!
//! The pipeline is a pure, stateless transform chain:
//!
//! 1. [`columns::resolve_columns`] - rename heterogeneous provider columns
//!    onto the canonical metrics
//! 2. [`window::filter_recent`] - keep the trailing N-year window
//! 3. [`period::classify_periods`] - partition into annual and half-year
//!    series
//! 4. [`growth::yoy_growth`] - attach year-over-year growth rates, run once
//!    per series
//! 5. [`summary::summarize`] - latest record and coverage per series
//!
//! [`analyze`] runs the whole chain. Every stage is a deterministic
//! function of its input; re-running the pipeline on the same raw table
//! yields an identical result.

/// Column resolution for heterogeneous provider tables.
pub mod columns;
/// Year-over-year growth computation.
pub mod growth;
/// Period classification of statement records.
pub mod period;
/// Latest-record summaries.
pub mod summary;
/// Trailing time-window filtering.
pub mod window;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::debug;

use ashare_core::{StockAnalysis, StockCode};

pub use period::ClassifiedRecords;
pub use window::DEFAULT_YEARS_BACK;

/// Runs the full analysis pipeline over a raw provider table.
///
/// An empty or unusable table (no recognizable date column, nothing inside
/// the window, no non-null metrics) yields an empty analysis, never an
/// error.
#[must_use]
pub fn analyze(
    code: StockCode,
    table: &DataFrame,
    years_back: u32,
    today: NaiveDate,
) -> StockAnalysis {
    let records = columns::resolve_columns(table);
    let records = window::filter_recent(records, years_back, today);
    let classified = period::classify_periods(&records);

    let annual = growth::yoy_growth(&classified.annual);
    let half_year = growth::yoy_growth(&classified.half_year);
    let summary = summary::summarize(&annual, &half_year);

    debug!(
        code = %code,
        annual = annual.len(),
        half_year = half_year.len(),
        "analysis pipeline finished"
    );

    StockAnalysis {
        code,
        annual,
        half_year,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn sample_table() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "REPORT_DATE".into(),
                vec![
                    "2021-12-31 00:00:00",
                    "2022-06-30 00:00:00",
                    "2022-12-31 00:00:00",
                    "2023-03-31 00:00:00",
                    "2023-06-30 00:00:00",
                    "2023-12-31 00:00:00",
                ],
            ),
            Column::new(
                "TOTAL_OPERATE_INCOME".into(),
                vec![900.0, 480.0, 1000.0, 260.0, 520.0, 1100.0],
            ),
            Column::new(
                "PARENT_NETPROFIT".into(),
                vec![150.0, 90.0, 200.0, 55.0, 99.0, 180.0],
            ),
            Column::new(
                "OPERATE_PROFIT".into(),
                vec![190.0, 110.0, 240.0, 70.0, 121.0, 230.0],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let analysis = analyze(StockCode::new("600519"), &sample_table(), 10, today);

        // Quarterly row (2023-03-31) is in neither series.
        assert_eq!(analysis.annual.len(), 3);
        assert_eq!(analysis.half_year.len(), 2);

        // Newest-first ordering in both series.
        assert!(
            analysis
                .annual
                .windows(2)
                .all(|w| w[0].report_date > w[1].report_date)
        );

        // 2023 annual growth vs 2022: +10% revenue, -10% net profit.
        let latest = &analysis.annual[0];
        assert!((latest.net_revenue_yoy_growth.unwrap() - 10.0).abs() < 1e-9);
        assert!((latest.net_profit_yoy_growth.unwrap() + 10.0).abs() < 1e-9);

        // Half-year growth is computed against the prior half-year record,
        // independently of the annual series.
        let latest_half = &analysis.half_year[0];
        assert!((latest_half.net_profit_yoy_growth.unwrap() - 10.0).abs() < 1e-9);

        // Oldest record of each series has null growth.
        assert!(
            analysis
                .annual
                .last()
                .unwrap()
                .net_revenue_yoy_growth
                .is_none()
        );

        let summary = analysis.summary.annual.unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.latest.net_revenue, Some(1100.0));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let table = sample_table();

        let first = analyze(StockCode::new("600519"), &table, 10, today);
        let second = analyze(StockCode::new("600519"), &table, 10, today);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_table_yields_empty_analysis() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let analysis = analyze(StockCode::new("600519"), &DataFrame::empty(), 10, today);
        assert!(analysis.is_empty());
        assert!(analysis.summary.annual.is_none());
        assert!(analysis.summary.half_year.is_none());
    }
}
