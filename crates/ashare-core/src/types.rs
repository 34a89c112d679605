//! Core data types for A-share statement analysis.
//!
//! This module defines the fundamental data structures:
//!
//! - [`StockCode`] - A-share stock code with exchange prefixing
//! - [`Metric`] - The canonical financial metrics this system tracks
//! - [`FinancialRecord`] - One normalized statement row
//! - [`GrowthRecord`] - A record extended with year-over-year growth rates
//! - [`StockAnalysis`] - Fully processed output for one stock

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::period::PeriodClass;

/// An A-share exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// Shanghai Stock Exchange.
    Shanghai,
    /// Shenzhen Stock Exchange.
    Shenzhen,
}

impl Exchange {
    /// Returns the symbol prefix used by the data provider.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Shanghai => "SH",
            Self::Shenzhen => "SZ",
        }
    }
}

/// An A-share stock code (e.g. "600519").
///
/// Codes are trimmed on creation. The owning exchange is derived from the
/// leading digit: '6' is Shanghai, '0' and '3' are Shenzhen, anything else
/// defaults to Shanghai.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockCode(String);

impl StockCode {
    /// Creates a new stock code from a string, trimming surrounding whitespace.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_string())
    }

    /// Returns the stock code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the exchange this code belongs to.
    #[must_use]
    pub fn exchange(&self) -> Exchange {
        match self.0.chars().next() {
            Some('0' | '3') => Exchange::Shenzhen,
            _ => Exchange::Shanghai,
        }
    }

    /// Returns the exchange-prefixed symbol the data provider expects
    /// (e.g. "SH600519").
    #[must_use]
    pub fn prefixed(&self) -> String {
        format!("{}{}", self.exchange().prefix(), self.0)
    }
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StockCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for StockCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StockCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The canonical financial metrics tracked by this system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Total operating revenue (营业总收入).
    NetRevenue,
    /// Net profit (净利润).
    NetProfit,
    /// Operating profit (营业利润).
    OperatingProfit,
}

impl Metric {
    /// All canonical metrics, in canonical order.
    pub const ALL: [Self; 3] = [Self::NetRevenue, Self::NetProfit, Self::OperatingProfit];

    /// Returns the canonical field name for this metric.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetRevenue => "net_revenue",
            Self::NetProfit => "net_profit",
            Self::OperatingProfit => "operating_profit",
        }
    }
}

/// One normalized financial statement row.
///
/// A record survives normalization only if at least one metric is non-null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// End date of the statement's fiscal period.
    pub report_date: NaiveDate,
    /// Total operating revenue.
    pub net_revenue: Option<f64>,
    /// Net profit.
    pub net_profit: Option<f64>,
    /// Operating profit.
    pub operating_profit: Option<f64>,
}

impl FinancialRecord {
    /// Creates a record with all metrics unset.
    #[must_use]
    pub const fn new(report_date: NaiveDate) -> Self {
        Self {
            report_date,
            net_revenue: None,
            net_profit: None,
            operating_profit: None,
        }
    }

    /// Returns the value of a canonical metric.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::NetRevenue => self.net_revenue,
            Metric::NetProfit => self.net_profit,
            Metric::OperatingProfit => self.operating_profit,
        }
    }

    /// Sets the value of a canonical metric.
    pub const fn set_metric(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::NetRevenue => self.net_revenue = value,
            Metric::NetProfit => self.net_profit = value,
            Metric::OperatingProfit => self.operating_profit = value,
        }
    }

    /// Returns true if at least one metric is non-null.
    #[must_use]
    pub const fn has_any_metric(&self) -> bool {
        self.net_revenue.is_some() || self.net_profit.is_some() || self.operating_profit.is_some()
    }
}

/// A [`FinancialRecord`] extended with year-over-year growth rates.
///
/// Growth fields are percentages relative to the prior chronological record
/// of the same period class; null when no prior comparator exists, when
/// either side of the comparison is null, or when the baseline is zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    /// End date of the statement's fiscal period.
    pub report_date: NaiveDate,
    /// Total operating revenue.
    pub net_revenue: Option<f64>,
    /// Net profit.
    pub net_profit: Option<f64>,
    /// Operating profit.
    pub operating_profit: Option<f64>,
    /// Year-over-year revenue growth, in percent.
    pub net_revenue_yoy_growth: Option<f64>,
    /// Year-over-year net profit growth, in percent.
    pub net_profit_yoy_growth: Option<f64>,
    /// Year-over-year operating profit growth, in percent.
    pub operating_profit_yoy_growth: Option<f64>,
}

impl GrowthRecord {
    /// Creates a growth record from a plain record, with all growth fields
    /// unset.
    #[must_use]
    pub const fn from_record(record: FinancialRecord) -> Self {
        Self {
            report_date: record.report_date,
            net_revenue: record.net_revenue,
            net_profit: record.net_profit,
            operating_profit: record.operating_profit,
            net_revenue_yoy_growth: None,
            net_profit_yoy_growth: None,
            operating_profit_yoy_growth: None,
        }
    }

    /// Returns the underlying record without growth fields.
    #[must_use]
    pub const fn record(&self) -> FinancialRecord {
        FinancialRecord {
            report_date: self.report_date,
            net_revenue: self.net_revenue,
            net_profit: self.net_profit,
            operating_profit: self.operating_profit,
        }
    }

    /// Returns the value of a canonical metric.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::NetRevenue => self.net_revenue,
            Metric::NetProfit => self.net_profit,
            Metric::OperatingProfit => self.operating_profit,
        }
    }

    /// Returns the growth rate of a canonical metric.
    #[must_use]
    pub const fn growth(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::NetRevenue => self.net_revenue_yoy_growth,
            Metric::NetProfit => self.net_profit_yoy_growth,
            Metric::OperatingProfit => self.operating_profit_yoy_growth,
        }
    }

    /// Sets the growth rate of a canonical metric.
    pub const fn set_growth(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::NetRevenue => self.net_revenue_yoy_growth = value,
            Metric::NetProfit => self.net_profit_yoy_growth = value,
            Metric::OperatingProfit => self.operating_profit_yoy_growth = value,
        }
    }
}

/// Summary of one period-class series: the latest statement and how many
/// periods the series covers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Period class this summary describes.
    pub period: PeriodClass,
    /// The most recent record of the series.
    pub latest: FinancialRecord,
    /// Number of records in the series.
    pub count: usize,
}

/// Summary over both period classes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Annual series summary, if the series is non-empty.
    pub annual: Option<PeriodSummary>,
    /// Half-year series summary, if the series is non-empty.
    pub half_year: Option<PeriodSummary>,
}

/// Fully processed analysis output for one stock.
///
/// Both series are sorted descending by report date (most recent first).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    /// The analyzed stock code.
    pub code: StockCode,
    /// Annual statements with growth rates, newest first.
    pub annual: Vec<GrowthRecord>,
    /// Half-year statements with growth rates, newest first.
    pub half_year: Vec<GrowthRecord>,
    /// Latest-record summary per period class.
    pub summary: AnalysisSummary,
}

impl StockAnalysis {
    /// Creates an empty analysis, the "no data available" result.
    #[must_use]
    pub fn empty(code: StockCode) -> Self {
        Self {
            code,
            annual: Vec::new(),
            half_year: Vec::new(),
            summary: AnalysisSummary::default(),
        }
    }

    /// Returns true if neither series contains any records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annual.is_empty() && self.half_year.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_code_trims() {
        let code = StockCode::new("  600519 ");
        assert_eq!(code.as_str(), "600519");
    }

    #[test]
    fn test_exchange_from_leading_digit() {
        assert_eq!(StockCode::new("600519").exchange(), Exchange::Shanghai);
        assert_eq!(StockCode::new("000951").exchange(), Exchange::Shenzhen);
        assert_eq!(StockCode::new("300750").exchange(), Exchange::Shenzhen);
        // Unrecognized leading digits default to Shanghai.
        assert_eq!(StockCode::new("900001").exchange(), Exchange::Shanghai);
    }

    #[test]
    fn test_prefixed_symbol() {
        assert_eq!(StockCode::new("600519").prefixed(), "SH600519");
        assert_eq!(StockCode::new("000951").prefixed(), "SZ000951");
    }

    #[test]
    fn test_record_metric_accessors() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let mut record = FinancialRecord::new(date);
        assert!(!record.has_any_metric());

        record.set_metric(Metric::NetProfit, Some(200.0));
        assert!(record.has_any_metric());
        assert_eq!(record.metric(Metric::NetProfit), Some(200.0));
        assert_eq!(record.metric(Metric::NetRevenue), None);
    }

    #[test]
    fn test_growth_record_from_record() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let mut record = FinancialRecord::new(date);
        record.set_metric(Metric::NetRevenue, Some(1000.0));

        let growth = GrowthRecord::from_record(record.clone());
        assert_eq!(growth.metric(Metric::NetRevenue), Some(1000.0));
        assert_eq!(growth.growth(Metric::NetRevenue), None);
        assert_eq!(growth.record(), record);
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = StockAnalysis::empty(StockCode::new("600519"));
        assert!(analysis.is_empty());
        assert!(analysis.summary.annual.is_none());
    }
}
