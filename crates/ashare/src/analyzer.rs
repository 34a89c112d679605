//! Stock analyzer wiring providers, cache, and the analysis pipeline.

use std::sync::Arc;

use chrono::Utc;
use polars::prelude::DataFrame;
use tracing::{debug, warn};

use ashare_core::{AnalysisCache, StatementProvider, StockAnalysis, StockCode};

/// Orchestrates the full analysis of a stock code.
///
/// Providers are tried in registration order until one succeeds. An
/// optional cache sits in front of the whole pipeline: a hit bypasses the
/// provider fetch and every pipeline stage.
///
/// Collaborator failures stop at this boundary: when every provider fails,
/// the analyzer logs a warning and produces an empty analysis. Callers
/// interpret an empty analysis as "no data for this code".
///
/// # Example
///
/// ```rust,ignore
/// use ashare::{StockAnalyzer, StockCode};
/// use ashare_cache::InMemoryCache;
/// use std::sync::Arc;
///
/// let analyzer = StockAnalyzer::new()
///     .with_eastmoney()
///     .set_cache(Arc::new(InMemoryCache::new()));
///
/// let analysis = analyzer.analyze(&StockCode::new("600519")).await;
/// ```
#[derive(Default)]
pub struct StockAnalyzer {
    providers: Vec<Arc<dyn StatementProvider>>,
    cache: Option<Arc<dyn AnalysisCache>>,
    years_back: u32,
}

impl std::fmt::Debug for StockAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockAnalyzer")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .field("years_back", &self.years_back())
            .finish()
    }
}

impl StockAnalyzer {
    /// Create a new analyzer with no providers and no cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new analyzer with a cache.
    #[must_use]
    pub fn with_cache(cache: Arc<dyn AnalysisCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Default::default()
        }
    }

    /// Set the cache for this analyzer.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn AnalysisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the trailing analysis window, in years.
    #[must_use]
    pub fn set_years_back(mut self, years_back: u32) -> Self {
        self.years_back = years_back;
        self
    }

    /// The effective trailing window, in years.
    #[must_use]
    pub fn years_back(&self) -> u32 {
        if self.years_back == 0 {
            ashare_analysis::DEFAULT_YEARS_BACK
        } else {
            self.years_back
        }
    }

    /// Register a statement provider.
    pub fn register_provider(&mut self, provider: Arc<dyn StatementProvider>) {
        debug!(provider = provider.name(), "Registering statement provider");
        self.providers.push(provider);
    }

    /// Add the East Money provider.
    #[cfg(feature = "eastmoney")]
    #[must_use]
    pub fn with_eastmoney(mut self) -> Self {
        self.register_provider(Arc::new(ashare_eastmoney::EastMoneyProvider::new()));
        self
    }

    /// Analyze a stock code.
    ///
    /// Runs fetch → resolve → filter → classify → growth and returns the
    /// processed result. Never fails: provider and cache problems are
    /// logged and collapse into an empty analysis.
    pub async fn analyze(&self, code: &StockCode) -> StockAnalysis {
        // Check cache first; a cache error is not a reason to skip analysis.
        if let Some(cache) = &self.cache {
            if let Ok(Some(hit)) = cache.get(code).await {
                debug!(code = %code, "Cache hit for analysis");
                return hit;
            }
        }

        let table = self.fetch_profit_sheet(code).await;
        let analysis =
            ashare_analysis::analyze(code.clone(), &table, self.years_back(), Utc::now().date_naive());

        // Only successful (non-empty) results are worth memoizing; caching
        // an outage would pin "no data" until the entry is invalidated.
        if !analysis.is_empty() {
            if let Some(cache) = &self.cache {
                if let Err(e) = cache.put(code, &analysis).await {
                    warn!(code = %code, error = %e, "Failed to cache analysis");
                }
            }
        }

        analysis
    }

    /// Fetch the raw profit sheet, trying providers in order.
    ///
    /// All failures end in an empty table; the caller treats that as the
    /// "no data available" signal.
    async fn fetch_profit_sheet(&self, code: &StockCode) -> DataFrame {
        if self.providers.is_empty() {
            warn!("No statement providers registered");
            return DataFrame::empty();
        }

        for provider in &self.providers {
            debug!(
                provider = provider.name(),
                code = %code,
                "Fetching profit sheet"
            );

            match provider.fetch_profit_sheet(code).await {
                Ok(table) => return table,
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Provider failed, trying next"
                    );
                }
            }
        }

        warn!(code = %code, "All statement providers failed");
        DataFrame::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashare_core::{AshareError, Result};
    use async_trait::async_trait;
    use chrono::Datelike;
    use polars::prelude::Column;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubProvider {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl StatementProvider for StubProvider {
        fn name(&self) -> &str {
            "Stub"
        }

        fn description(&self) -> &str {
            "Fixed-table provider for tests"
        }

        async fn fetch_profit_sheet(&self, _code: &StockCode) -> Result<DataFrame> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AshareError::Network("stub outage".to_string()));
            }
            let today = Utc::now().date_naive();
            let last_year = today.year() - 1;
            Ok(DataFrame::new(vec![
                Column::new(
                    "REPORT_DATE".into(),
                    vec![
                        format!("{}-12-31", last_year - 1),
                        format!("{last_year}-12-31"),
                    ],
                ),
                Column::new("营业总收入".into(), vec![1000.0, 1100.0]),
                Column::new("净利润".into(), vec![200.0, 180.0]),
            ])
            .unwrap())
        }
    }

    #[tokio::test]
    async fn test_analyze_produces_growth_series() {
        let mut analyzer = StockAnalyzer::new();
        analyzer.register_provider(Arc::new(StubProvider::default()));

        let analysis = analyzer.analyze(&StockCode::new("600519")).await;
        assert_eq!(analysis.annual.len(), 2);
        assert!((analysis.annual[0].net_revenue_yoy_growth.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(analysis.summary.annual.as_ref().unwrap().count, 2);
    }

    #[tokio::test]
    async fn test_provider_failure_yields_empty_analysis() {
        let mut analyzer = StockAnalyzer::new();
        analyzer.register_provider(Arc::new(StubProvider::failing()));

        let analysis = analyzer.analyze(&StockCode::new("600519")).await;
        assert!(analysis.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_to_second_provider() {
        let good = Arc::new(StubProvider::default());
        let mut analyzer = StockAnalyzer::new();
        analyzer.register_provider(Arc::new(StubProvider::failing()));
        analyzer.register_provider(good.clone());

        let analysis = analyzer.analyze(&StockCode::new("600519")).await;
        assert!(!analysis.is_empty());
        assert_eq!(good.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_hit_bypasses_providers() {
        let provider = Arc::new(StubProvider::default());
        let mut analyzer =
            StockAnalyzer::with_cache(Arc::new(ashare_cache::InMemoryCache::new()));
        analyzer.register_provider(provider.clone());

        let code = StockCode::new("600519");
        let first = analyzer.analyze(&code).await;
        let second = analyzer.analyze(&code).await;

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_providers_is_empty_not_error() {
        let analyzer = StockAnalyzer::new();
        let analysis = analyzer.analyze(&StockCode::new("600519")).await;
        assert!(analysis.is_empty());
    }
}
