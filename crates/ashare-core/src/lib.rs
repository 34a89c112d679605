#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for A-share statement analysis.
//!
//! This crate provides the foundational abstractions the other ashare
//! crates build on:
//!
//! - [`StatementProvider`](provider::StatementProvider) - Raw profit-sheet retrieval
//! - [`AnalysisCache`](cache::AnalysisCache) - Memoization of processed results
//! - [`StockCode`](types::StockCode) - Stock codes and exchange prefixing
//! - [`FinancialRecord`](types::FinancialRecord) / [`GrowthRecord`](types::GrowthRecord) - Normalized statement rows
//! - [`PeriodClass`](period::PeriodClass) - Annual vs. half-year classification

/// Cache trait for processed analysis results.
pub mod cache;
/// Error types for analysis operations.
pub mod error;
/// Reporting period definitions.
pub mod period;
/// Provider trait for raw statement data.
pub mod provider;
/// Core data types (StockCode, FinancialRecord, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::AnalysisCache;
pub use error::{AshareError, Result};
pub use period::PeriodClass;
pub use provider::StatementProvider;
pub use types::{
    AnalysisSummary, Exchange, FinancialRecord, GrowthRecord, Metric, PeriodSummary,
    StockAnalysis, StockCode,
};
