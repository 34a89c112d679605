#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! East Money profit-sheet provider.
//!
//! This crate implements [`StatementProvider`] against the East Money F10
//! finance-analysis endpoint. Column labels in the response vary by company
//! category (banks, insurers, brokers, and general industry report under
//! different `companyType` values with partially different schemas), so the
//! rows are handed downstream as a raw table without interpretation.
//!
//! # Features
//!
//! - `companyType` fallback 4→3→2→1 until a non-empty row set comes back
//! - Built-in rate limiting (1 request per second by default)
//! - Per-column dtype inference when assembling the table
//!
//! # Example
//!
//! ```no_run
//! use ashare_eastmoney::EastMoneyProvider;
//! use ashare_core::{StatementProvider, StockCode};
//!
//! # async fn example() -> ashare_core::Result<()> {
//! let provider = EastMoneyProvider::new();
//! let code = StockCode::new("600519");
//!
//! let table = provider.fetch_profit_sheet(&code).await?;
//! println!("Fetched {} statement rows", table.height());
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use polars::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use ashare_core::{AshareError, Result, StatementProvider, StockCode};

/// East Money F10 profit statement endpoint.
const PROFIT_SHEET_URL: &str =
    "https://emweb.securities.eastmoney.com/PC_HSF10/NewFinanceAnalysis/lrbAjaxNew";

/// Company categories tried in order until one returns data. General
/// industry is 4; brokers, insurers, and banks file under 3, 2, and 1.
const COMPANY_TYPES: &[&str] = &["4", "3", "2", "1"];

/// Default rate limit delay in milliseconds.
const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// East Money profit-sheet provider.
///
/// Implements [`StatementProvider`].
#[derive(Debug)]
pub struct EastMoneyProvider {
    client: reqwest::Client,
    rate_limit_ms: u64,
    last_request_time: AtomicU64,
}

impl EastMoneyProvider {
    /// Create a new East Money provider with default settings.
    ///
    /// Uses built-in rate limiting of 1 request per second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(DEFAULT_RATE_LIMIT_MS))
    }

    /// Create a new East Money provider with a custom HTTP client.
    ///
    /// Uses the provided client for all HTTP requests. Rate limiting is
    /// still applied.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Create a new East Money provider with custom rate limiting.
    #[must_use]
    pub fn with_rate_limit(rate_limit: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            rate_limit_ms: rate_limit.as_millis() as u64,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Apply rate limiting before making a request.
    async fn apply_rate_limit(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last = self.last_request_time.load(Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);

        if elapsed < self.rate_limit_ms {
            let wait_time = self.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time)).await;
        }

        self.last_request_time.store(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            Ordering::Relaxed,
        );
    }

    /// Build the profit-sheet URL for a symbol and company category.
    fn build_profit_sheet_url(&self, symbol: &str, company_type: &str) -> String {
        format!(
            "{PROFIT_SHEET_URL}?companyType={company_type}&reportDateType=0&reportType=1&code={symbol}"
        )
    }

    /// Fetch one company-category variant of the profit sheet.
    async fn fetch_variant(&self, symbol: &str, company_type: &str) -> Result<Vec<JsonRow>> {
        self.apply_rate_limit().await;

        let url = self.build_profit_sheet_url(symbol, company_type);
        debug!("Fetching profit sheet: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AshareError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AshareError::RateLimited {
                provider: "East Money".to_string(),
                retry_after: Some(Duration::from_secs(60)),
            });
        }

        if !response.status().is_success() {
            return Err(AshareError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let payload: ProfitSheetResponse = response
            .json()
            .await
            .map_err(|e| AshareError::Parse(e.to_string()))?;

        Ok(payload.data.unwrap_or_default())
    }
}

impl Default for EastMoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatementProvider for EastMoneyProvider {
    fn name(&self) -> &str {
        "East Money"
    }

    fn description(&self) -> &str {
        "East Money F10 profit statement data for Shanghai and Shenzhen listings"
    }

    async fn fetch_profit_sheet(&self, code: &StockCode) -> Result<DataFrame> {
        let symbol = code.prefixed();

        for company_type in COMPANY_TYPES {
            let rows = self.fetch_variant(&symbol, company_type).await?;
            if rows.is_empty() {
                debug!(
                    symbol = %symbol,
                    company_type,
                    "no rows for company category, trying next"
                );
                continue;
            }
            return rows_to_dataframe(&rows);
        }

        // Every category came back empty: a "no data for this code" answer.
        warn!(symbol = %symbol, "no profit sheet data in any company category");
        Ok(DataFrame::empty())
    }
}

/// One raw statement row as returned by the endpoint.
type JsonRow = serde_json::Map<String, Value>;

/// Profit-sheet endpoint response envelope.
#[derive(Debug, Deserialize)]
struct ProfitSheetResponse {
    #[serde(default)]
    data: Option<Vec<JsonRow>>,
}

/// Assemble raw JSON rows into a table, preserving first-seen column order.
///
/// A column whose non-null values are all numbers becomes Float64;
/// everything else becomes a string column. Mixed columns stay strings so
/// nothing is lost before resolution.
fn rows_to_dataframe(rows: &[JsonRow]) -> Result<DataFrame> {
    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in rows {
        for key in row.keys() {
            if seen.insert(key) {
                order.push(key);
            }
        }
    }

    let mut columns = Vec::with_capacity(order.len());
    for name in order {
        if is_numeric_column(rows, name) {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|row| row.get(name).and_then(Value::as_f64))
                .collect();
            columns.push(Column::new(name.into(), values));
        } else {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| row.get(name).and_then(json_to_string))
                .collect();
            columns.push(Column::new(name.into(), values));
        }
    }

    DataFrame::new(columns).map_err(|e| AshareError::Parse(e.to_string()))
}

fn is_numeric_column(rows: &[JsonRow], name: &str) -> bool {
    let mut any_number = false;
    for row in rows {
        match row.get(name) {
            None | Some(Value::Null) => {}
            Some(Value::Number(_)) => any_number = true,
            Some(_) => return false,
        }
    }
    any_number
}

fn json_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<JsonRow> {
        let payload = serde_json::json!([
            {
                "REPORT_DATE": "2022-12-31 00:00:00",
                "TOTAL_OPERATE_INCOME": 1000.0,
                "PARENT_NETPROFIT": 200,
                "SECURITY_NAME_ABBR": "贵州茅台",
                "NOTES": null
            },
            {
                "REPORT_DATE": "2023-12-31 00:00:00",
                "TOTAL_OPERATE_INCOME": 1100.0,
                "PARENT_NETPROFIT": null,
                "SECURITY_NAME_ABBR": "贵州茅台",
                "NOTES": null
            }
        ]);
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn test_rows_to_dataframe_dtypes() {
        let df = rows_to_dataframe(&sample_rows()).unwrap();
        assert_eq!(df.height(), 2);

        assert_eq!(df.column("REPORT_DATE").unwrap().dtype(), &DataType::String);
        assert_eq!(
            df.column("TOTAL_OPERATE_INCOME").unwrap().dtype(),
            &DataType::Float64
        );
        // Integer JSON values still land in a float column.
        assert_eq!(
            df.column("PARENT_NETPROFIT").unwrap().dtype(),
            &DataType::Float64
        );
        assert_eq!(
            df.column("SECURITY_NAME_ABBR").unwrap().dtype(),
            &DataType::String
        );
    }

    #[test]
    fn test_rows_to_dataframe_preserves_column_order() {
        let df = rows_to_dataframe(&sample_rows()).unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names[0], "REPORT_DATE");
        assert_eq!(names[1], "TOTAL_OPERATE_INCOME");
    }

    #[test]
    fn test_rows_to_dataframe_nulls() {
        let df = rows_to_dataframe(&sample_rows()).unwrap();
        let profits: Vec<Option<f64>> = df
            .column("PARENT_NETPROFIT")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(profits, vec![Some(200.0), None]);
    }

    #[test]
    fn test_build_profit_sheet_url() {
        let provider = EastMoneyProvider::new();
        let url = provider.build_profit_sheet_url("SH600519", "4");

        assert!(url.starts_with(PROFIT_SHEET_URL));
        assert!(url.contains("companyType=4"));
        assert!(url.contains("code=SH600519"));
    }

    #[test]
    fn test_provider_metadata() {
        let provider = EastMoneyProvider::default();
        assert_eq!(provider.name(), "East Money");
        assert!(!provider.description().is_empty());
    }

    #[test]
    fn test_parse_response_envelope() {
        let payload = r#"{"version": "1", "status": 0, "data": null}"#;
        let response: ProfitSheetResponse = serde_json::from_str(payload).unwrap();
        assert!(response.data.unwrap_or_default().is_empty());
    }
}
