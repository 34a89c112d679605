//! HTTP routes for stock analysis and the starred-stocks watchlist.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use ashare::{AnalysisSummary, GrowthRecord, StockAnalysis, StockCode};
use ashare_store::{DEFAULT_USER, StarredStock};

use crate::error::AppError;
use crate::format;
use crate::state::AppState;

/// Stocks warmed into the cache at startup and served by `/prefetched`.
pub const POPULAR_STOCKS: &[&str] = &["000951", "000739"];

/// Table headers the frontend renders, as (key, label) pairs.
const TABLE_HEADERS: &[(&str, &str)] = &[
    ("report_date", "报告日期"),
    ("net_revenue", "营业收入"),
    ("net_profit", "净利润"),
    ("operating_profit", "营业利润"),
    ("net_revenue_growth", "营业收入增长率"),
    ("net_profit_growth", "净利润增长率"),
    ("operating_profit_growth", "营业利润增长率"),
];

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze_stock))
        .route("/prefetched", get(get_prefetched))
        .route("/starred", get(get_starred).post(add_starred))
        .route("/starred/clear", post(clear_starred))
        .route("/starred/check/:code", get(check_starred))
        .route("/starred/:code", delete(remove_starred))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Warms the analysis cache for the popular stock list.
pub async fn prefetch_popular(state: &AppState) {
    info!("Starting pre-fetch for popular stocks");

    let mut warmed = 0usize;
    for code in POPULAR_STOCKS {
        let analysis = state.analyzer.analyze(&StockCode::new(*code)).await;
        if analysis.is_empty() {
            warn!(code, "pre-fetch returned no data");
        } else {
            warmed += 1;
        }
    }

    info!(warmed, total = POPULAR_STOCKS.len(), "Pre-fetch completed");
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Deserialize)]
struct AnalyzeRequest {
    stock_code: String,
}

#[derive(Deserialize)]
struct UserQuery {
    user_id: Option<String>,
}

impl UserQuery {
    fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_USER)
    }
}

#[derive(Deserialize)]
struct AddStarredRequest {
    stock_code: String,
    #[serde(default)]
    stock_name: String,
    user_id: Option<String>,
}

#[derive(Default, Deserialize)]
struct ClearStarredRequest {
    user_id: Option<String>,
}

#[derive(Serialize)]
struct Header {
    key: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct TableRow {
    report_date: String,
    net_revenue: String,
    net_profit: String,
    operating_profit: String,
    net_revenue_growth: String,
    net_profit_growth: String,
    operating_profit_growth: String,
}

#[derive(Serialize)]
struct TableData {
    headers: Vec<Header>,
    rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct SummaryRow {
    #[serde(rename = "type")]
    kind: String,
    date: String,
    net_revenue: String,
    net_profit: String,
    operating_profit: String,
    coverage: String,
}

#[derive(Serialize)]
struct AnalysisResponse {
    stock_code: String,
    annual_data: TableData,
    halfyear_data: TableData,
    summary: Vec<SummaryRow>,
}

impl AnalysisResponse {
    fn from_analysis(analysis: &StockAnalysis) -> Self {
        Self {
            stock_code: analysis.code.as_str().to_string(),
            annual_data: table_data(&analysis.annual, "annual"),
            halfyear_data: table_data(&analysis.half_year, "half-year"),
            summary: summary_rows(&analysis.summary),
        }
    }
}

fn table_data(records: &[GrowthRecord], label: &str) -> TableData {
    if records.is_empty() {
        return TableData {
            headers: Vec::new(),
            rows: Vec::new(),
            message: Some(format!("no {label} data")),
        };
    }

    let headers = TABLE_HEADERS
        .iter()
        .map(|&(key, label)| Header { key, label })
        .collect();

    let rows = records
        .iter()
        .map(|r| TableRow {
            report_date: format::format_date(r.report_date),
            net_revenue: format::format_amount(r.net_revenue),
            net_profit: format::format_amount(r.net_profit),
            operating_profit: format::format_amount(r.operating_profit),
            net_revenue_growth: format::format_growth(r.net_revenue_yoy_growth),
            net_profit_growth: format::format_growth(r.net_profit_yoy_growth),
            operating_profit_growth: format::format_growth(r.operating_profit_yoy_growth),
        })
        .collect();

    TableData {
        headers,
        rows,
        message: None,
    }
}

fn summary_rows(summary: &AnalysisSummary) -> Vec<SummaryRow> {
    let mut rows = Vec::new();

    if let Some(annual) = &summary.annual {
        rows.push(SummaryRow {
            kind: "最新年报".to_string(),
            date: format::format_date(annual.latest.report_date),
            net_revenue: format::format_amount(annual.latest.net_revenue),
            net_profit: format::format_amount(annual.latest.net_profit),
            operating_profit: format::format_amount(annual.latest.operating_profit),
            coverage: format!("{} 年", annual.count),
        });
    }

    if let Some(half_year) = &summary.half_year {
        rows.push(SummaryRow {
            kind: "最新半年报".to_string(),
            date: format::format_date(half_year.latest.report_date),
            net_revenue: format::format_amount(half_year.latest.net_revenue),
            net_profit: format::format_amount(half_year.latest.net_profit),
            operating_profit: format::format_amount(half_year.latest.operating_profit),
            coverage: format!("{} 期", half_year.count),
        });
    }

    rows
}

#[derive(Serialize)]
struct StarredListResponse {
    starred_stocks: Vec<StarredStock>,
    count: usize,
}

#[derive(Serialize)]
struct StarredMutationResponse {
    message: String,
    stock_code: String,
    count: usize,
}

#[derive(Serialize)]
struct CheckStarredResponse {
    stock_code: String,
    is_starred: bool,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn analyze_stock(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let trimmed = req.stock_code.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("stock code is required"));
    }

    let code = StockCode::new(trimmed);
    let analysis = state.analyzer.analyze(&code).await;

    if analysis.is_empty() {
        return Err(AppError::bad_request(format!(
            "no financial data found for stock {code}"
        )));
    }

    Ok(Json(AnalysisResponse::from_analysis(&analysis)))
}

async fn get_prefetched(
    State(state): State<AppState>,
) -> Json<HashMap<String, AnalysisResponse>> {
    let mut prefetched = HashMap::new();
    for code in POPULAR_STOCKS {
        // Served from the cache once the startup warm-up has run.
        let analysis = state.analyzer.analyze(&StockCode::new(*code)).await;
        if !analysis.is_empty() {
            prefetched.insert(
                (*code).to_string(),
                AnalysisResponse::from_analysis(&analysis),
            );
        }
    }
    Json(prefetched)
}

async fn get_starred(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<StarredListResponse>, AppError> {
    let starred_stocks = state.store.list(query.user_id())?;
    let count = starred_stocks.len();
    Ok(Json(StarredListResponse {
        starred_stocks,
        count,
    }))
}

async fn add_starred(
    State(state): State<AppState>,
    Json(req): Json<AddStarredRequest>,
) -> Result<Json<StarredMutationResponse>, AppError> {
    let stock_code = req.stock_code.trim().to_string();
    if stock_code.is_empty() {
        return Err(AppError::bad_request("stock code is required"));
    }

    let user_id = req.user_id.as_deref().unwrap_or(DEFAULT_USER);
    let added = state.store.add(&stock_code, &req.stock_name, user_id)?;
    let count = state.store.count(user_id)?;

    let message = if added {
        "stock starred".to_string()
    } else {
        "stock already starred".to_string()
    };

    Ok(Json(StarredMutationResponse {
        message,
        stock_code,
        count,
    }))
}

async fn remove_starred(
    State(state): State<AppState>,
    Path(stock_code): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<StarredMutationResponse>, AppError> {
    let user_id = query.user_id();
    let removed = state.store.remove(&stock_code, user_id)?;

    if !removed {
        return Err(AppError::not_found("stock not in starred list"));
    }

    Ok(Json(StarredMutationResponse {
        message: "stock unstarred".to_string(),
        stock_code,
        count: state.store.count(user_id)?,
    }))
}

async fn clear_starred(
    State(state): State<AppState>,
    body: Option<Json<ClearStarredRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let user_id = req.user_id.as_deref().unwrap_or(DEFAULT_USER);

    state.store.clear_all(user_id)?;
    Ok(Json(serde_json::json!({
        "message": "starred list cleared",
        "count": 0,
    })))
}

async fn check_starred(
    State(state): State<AppState>,
    Path(stock_code): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CheckStarredResponse>, AppError> {
    let is_starred = state.store.is_starred(&stock_code, query.user_id())?;
    Ok(Json(CheckStarredResponse {
        stock_code,
        is_starred,
    }))
}
