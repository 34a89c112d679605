//! Provider trait for fetching raw statement data.
//!
//! A [`StatementProvider`] is the black-box collaborator that returns the
//! raw profit-sheet table for a stock. Column names vary by provider and
//! company category; normalizing them is the analysis layer's job, so the
//! table is handed over as-is.

use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::fmt::Debug;

use crate::{error::Result, types::StockCode};

/// Provider of raw profit statement tables.
///
/// Implementations fetch the income statement history for a stock and
/// return it as a rows-by-named-columns table. An empty table is a valid
/// "no data for this code" answer and must not be reported as an error.
#[async_trait]
pub trait StatementProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g. "East Money").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;

    /// Fetches the profit statement table for a stock.
    ///
    /// The returned table keeps the provider's own column labels; the date
    /// column and metric columns are resolved downstream.
    async fn fetch_profit_sheet(&self, code: &StockCode) -> Result<DataFrame>;
}
