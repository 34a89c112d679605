//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use ashare_core::{AnalysisCache, Result, StockAnalysis, StockCode};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry {
    analysis: StockAnalysis,
    cached_at: chrono::DateTime<Utc>,
}

impl CacheEntry {
    fn new(analysis: StockAnalysis) -> Self {
        Self {
            analysis,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Simple in-memory cache keyed by stock code.
///
/// Entries are stored in an `RwLock`-protected `HashMap` and are lost when
/// the cache is dropped. Analyses are cloned on get/put operations.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    analyses: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisCache for InMemoryCache {
    #[instrument(skip(self), fields(code = %code))]
    async fn get(&self, code: &StockCode) -> Result<Option<StockAnalysis>> {
        let cache = self.analyses.read().await;
        match cache.get(code.as_str()) {
            Some(entry) => {
                debug!("Cache hit for analysis");
                Ok(Some(entry.analysis.clone()))
            }
            None => {
                debug!("Cache miss for analysis");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, analysis), fields(code = %code))]
    async fn put(&self, code: &StockCode, analysis: &StockAnalysis) -> Result<()> {
        let mut cache = self.analyses.write().await;
        cache.insert(code.as_str().to_string(), CacheEntry::new(analysis.clone()));
        debug!(
            annual = analysis.annual.len(),
            half_year = analysis.half_year.len(),
            "Cached analysis"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.analyses.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.analyses.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
