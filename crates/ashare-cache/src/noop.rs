//! No-op cache implementation.

use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

use ashare_core::{AnalysisCache, Result, StockAnalysis, StockCode};

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` returns `Ok(())`. Useful for
/// disabling memoization or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalysisCache for NoopCache {
    async fn get(&self, _code: &StockCode) -> Result<Option<StockAnalysis>> {
        trace!("NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _code: &StockCode, _analysis: &StockAnalysis) -> Result<()> {
        trace!("NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, nothing to invalidate");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, nothing to clear");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_never_stores() {
        let cache = NoopCache::new();
        let code = StockCode::new("600519");

        let analysis = StockAnalysis::empty(code.clone());
        cache.put(&code, &analysis).await.unwrap();

        assert!(cache.get(&code).await.unwrap().is_none());
        assert_eq!(cache.invalidate_stale(Duration::ZERO).await.unwrap(), 0);
    }
}
