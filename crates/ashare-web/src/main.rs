//! Web server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ashare::{InMemoryCache, StockAnalyzer};
use ashare_store::StarredStore;
use ashare_web::{AppState, app, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let analyzer = Arc::new(
        StockAnalyzer::new()
            .with_eastmoney()
            .set_cache(Arc::new(InMemoryCache::new())),
    );

    let db_path = std::env::var("ASHARE_DB").unwrap_or_else(|_| "stocks.db".to_string());
    let store = Arc::new(StarredStore::open(&db_path)?);
    info!(db = %db_path, "starred-stocks store ready");

    let state = AppState { analyzer, store };

    // Warm the cache for the popular list without delaying startup.
    let prefetch_state = state.clone();
    tokio::spawn(async move {
        routes::prefetch_popular(&prefetch_state).await;
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = format!("0.0.0.0:{port}");
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
