//! Cache trait for storing processed analysis results.
//!
//! This module defines the [`AnalysisCache`] trait, a memoization layer in
//! front of the full analysis pipeline. The key is the stock code; the
//! value is the finished [`StockAnalysis`]. A cache hit bypasses the
//! provider fetch and every pipeline stage.

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    error::Result,
    types::{StockAnalysis, StockCode},
};

/// Trait for caching fully processed analysis results.
///
/// Implementations can store results in various backends (in-memory, no-op)
/// to avoid repeated provider calls and pipeline runs.
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    /// Retrieves a cached analysis for a stock code.
    ///
    /// Returns `Ok(Some(analysis))` on a hit, `Ok(None)` on a miss.
    async fn get(&self, code: &StockCode) -> Result<Option<StockAnalysis>>;

    /// Stores an analysis result in the cache.
    async fn put(&self, code: &StockCode, analysis: &StockAnalysis) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached entries.
    async fn clear(&self) -> Result<()>;
}
