//! Shared application state.

use std::sync::Arc;

use ashare::StockAnalyzer;
use ashare_store::StarredStore;

/// State shared by all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The analyzer answering `/analyze` requests.
    pub analyzer: Arc<StockAnalyzer>,
    /// The starred-stocks watchlist store.
    pub store: Arc<StarredStore>,
}
