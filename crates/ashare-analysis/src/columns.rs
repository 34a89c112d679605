//! Column resolution for heterogeneous provider tables.
//!
//! Profit-sheet tables arrive with column labels that differ by provider
//! endpoint and company category: East Money technical codes
//! (`TOTAL_OPERATE_INCOME`), Chinese accounting terms (`营业总收入`), and
//! lowercase variants. [`resolve_columns`] maps them onto the three
//! canonical metrics and produces normalized records.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::debug;

use ashare_core::{FinancialRecord, Metric};

/// Candidate date-column labels, scanned in order. The first label present
/// in the table is the date source for the whole batch.
const DATE_COLUMNS: &[&str] = &["REPORT_DATE", "report_date", "REPORT_PERIOD", "报告期"];

/// Alternate column labels mapped onto canonical metrics.
///
/// Declaration order is the resolution priority: the first label present in
/// the table claims its metric, and later labels never overwrite it. Kept
/// as an ordered slice on purpose; an unordered map would lose the
/// tie-break.
const COLUMN_MAPPINGS: &[(&str, Metric)] = &[
    ("TOTAL_OPERATE_INCOME", Metric::NetRevenue),
    ("营业总收入", Metric::NetRevenue),
    ("营业收入", Metric::NetRevenue),
    ("total_operating_revenue", Metric::NetRevenue),
    ("operating_revenue", Metric::NetRevenue),
    ("总营收", Metric::NetRevenue),
    ("PARENT_NETPROFIT", Metric::NetProfit),
    ("NETPROFIT", Metric::NetProfit),
    ("净利润", Metric::NetProfit),
    ("net_profit", Metric::NetProfit),
    ("归属于母公司所有者的净利润", Metric::NetProfit),
    ("归母净利润", Metric::NetProfit),
    ("OPERATE_PROFIT", Metric::OperatingProfit),
    ("营业利润", Metric::OperatingProfit),
    ("operating_profit", Metric::OperatingProfit),
    ("经营利润", Metric::OperatingProfit),
];

/// Resolves a raw provider table into canonical records.
///
/// Rows whose date cannot be parsed and rows where all three metrics are
/// null are dropped. A table without any recognizable date column yields an
/// empty result: that is the "no data available" signal, not an error.
#[must_use]
pub fn resolve_columns(table: &DataFrame) -> Vec<FinancialRecord> {
    if table.height() == 0 {
        return Vec::new();
    }

    let names: Vec<&str> = table
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();

    let Some(date_label) = DATE_COLUMNS.iter().copied().find(|l| names.contains(l)) else {
        debug!("no date column found in provider table");
        return Vec::new();
    };

    let dates = match table.column(date_label) {
        Ok(column) => column_as_dates(column),
        Err(_) => return Vec::new(),
    };

    // One slot per canonical metric; a present label claims its slot even
    // if every value in the column turns out to be null.
    let mut resolved: [Option<Vec<Option<f64>>>; 3] = [None, None, None];
    for (label, metric) in COLUMN_MAPPINGS {
        let slot = &mut resolved[metric_index(*metric)];
        if slot.is_some() || !names.contains(label) {
            continue;
        }
        if let Ok(column) = table.column(label) {
            *slot = Some(column_as_f64(column).unwrap_or_else(|| vec![None; table.height()]));
        }
    }

    let mut records = Vec::with_capacity(table.height());
    for (row, date) in dates.iter().enumerate() {
        let Some(date) = date else { continue };
        let mut record = FinancialRecord::new(*date);
        for metric in Metric::ALL {
            if let Some(values) = &resolved[metric_index(metric)] {
                record.set_metric(metric, values.get(row).copied().flatten());
            }
        }
        if record.has_any_metric() {
            records.push(record);
        }
    }

    debug!(
        rows = table.height(),
        records = records.len(),
        date_column = date_label,
        "resolved provider table"
    );
    records
}

const fn metric_index(metric: Metric) -> usize {
    match metric {
        Metric::NetRevenue => 0,
        Metric::NetProfit => 1,
        Metric::OperatingProfit => 2,
    }
}

/// Parses a report date in any of the provider's known formats.
fn parse_report_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .ok()
}

fn column_as_dates(column: &Column) -> Vec<Option<NaiveDate>> {
    match column.dtype() {
        DataType::String => match column.str() {
            Ok(values) => values
                .into_iter()
                .map(|v| v.and_then(parse_report_date))
                .collect(),
            Err(_) => vec![None; column.len()],
        },
        _ => vec![None; column.len()],
    }
}

/// Extracts a column as floats. String values are parsed individually with
/// unparseable entries becoming null; non-finite values are treated as null
/// as well.
fn column_as_f64(column: &Column) -> Option<Vec<Option<f64>>> {
    let values: Vec<Option<f64>> = match column.dtype() {
        DataType::String => column
            .str()
            .ok()?
            .into_iter()
            .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect(),
        _ => {
            let casted = column.cast(&DataType::Float64).ok()?;
            casted.f64().ok()?.into_iter().collect()
        }
    };
    Some(
        values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_missing_date_column_yields_empty() {
        let df = table(vec![
            Column::new("营业总收入".into(), vec![1000.0, 1100.0]),
            Column::new("净利润".into(), vec![200.0, 180.0]),
        ]);
        assert!(resolve_columns(&df).is_empty());
    }

    #[test]
    fn test_resolves_chinese_labels() {
        let df = table(vec![
            Column::new("REPORT_DATE".into(), vec!["2022-12-31", "2023-12-31"]),
            Column::new("营业总收入".into(), vec![1000.0, 1100.0]),
            Column::new("净利润".into(), vec![200.0, 180.0]),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].net_revenue, Some(1000.0));
        assert_eq!(records[1].net_profit, Some(180.0));
        assert_eq!(records[0].operating_profit, None);
    }

    #[test]
    fn test_first_listed_label_wins() {
        // Both a technical code and a Chinese label map to net_revenue; the
        // technical code is declared first and must win.
        let df = table(vec![
            Column::new("REPORT_DATE".into(), vec!["2023-12-31"]),
            Column::new("TOTAL_OPERATE_INCOME".into(), vec![500.0]),
            Column::new("营业总收入".into(), vec![999.0]),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].net_revenue, Some(500.0));
    }

    #[test]
    fn test_later_label_does_not_fill_nulls_of_winner() {
        let df = table(vec![
            Column::new("REPORT_DATE".into(), vec!["2022-12-31", "2023-12-31"]),
            Column::new(
                "TOTAL_OPERATE_INCOME".into(),
                vec![Some(500.0), None] as Vec<Option<f64>>,
            ),
            Column::new("营业总收入".into(), vec![111.0, 222.0]),
            Column::new("净利润".into(), vec![10.0, 20.0]),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].net_revenue, Some(500.0));
        // The 2023 row keeps a null revenue; the runner-up label is ignored.
        assert_eq!(records[1].net_revenue, None);
        assert_eq!(records[1].net_profit, Some(20.0));
    }

    #[test]
    fn test_unparseable_numeric_becomes_null() {
        let df = table(vec![
            Column::new("REPORT_DATE".into(), vec!["2022-12-31", "2023-12-31"]),
            Column::new("营业总收入".into(), vec!["1000.5", "--"]),
            Column::new("净利润".into(), vec![200.0, 180.0]),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records[0].net_revenue, Some(1000.5));
        assert_eq!(records[1].net_revenue, None);
    }

    #[test]
    fn test_all_null_rows_dropped() {
        let df = table(vec![
            Column::new("REPORT_DATE".into(), vec!["2022-12-31", "2023-12-31"]),
            Column::new(
                "营业总收入".into(),
                vec![Some(1000.0), None] as Vec<Option<f64>>,
            ),
            Column::new("净利润".into(), vec![Some(200.0), None] as Vec<Option<f64>>),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].report_date,
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_datetime_and_compact_date_formats() {
        let df = table(vec![
            Column::new(
                "REPORT_DATE".into(),
                vec!["2022-12-31 00:00:00", "20230630", "not a date"],
            ),
            Column::new("净利润".into(), vec![1.0, 2.0, 3.0]),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].report_date,
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
        assert_eq!(
            records[1].report_date,
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()
        );
    }

    #[test]
    fn test_integer_columns_coerced() {
        let df = table(vec![
            Column::new("REPORT_DATE".into(), vec!["2023-12-31"]),
            Column::new("净利润".into(), vec![200i64]),
        ]);

        let records = resolve_columns(&df);
        assert_eq!(records[0].net_profit, Some(200.0));
    }

    #[test]
    fn test_fallback_date_label() {
        let df = table(vec![
            Column::new("报告期".into(), vec!["2023-12-31"]),
            Column::new("净利润".into(), vec![200.0]),
        ]);

        assert_eq!(resolve_columns(&df).len(), 1);
    }

    #[test]
    fn test_empty_table() {
        assert!(resolve_columns(&DataFrame::empty()).is_empty());
    }
}
