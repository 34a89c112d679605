#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! A-share financial statement retrieval and growth analysis.
//!
//! This crate ties the workspace together: it re-exports the core types
//! and the cache implementations, and provides [`StockAnalyzer`] which
//! wires statement providers, the memoization cache, and the normalization
//! and growth pipeline into one call.
//!
//! # Features
//!
//! - `eastmoney` (default) - East Money profit-sheet provider
//!
//! # Example
//!
//! ```rust,ignore
//! use ashare::{StockAnalyzer, StockCode};
//! use ashare::InMemoryCache;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let analyzer = StockAnalyzer::new()
//!         .with_eastmoney()
//!         .set_cache(Arc::new(InMemoryCache::new()));
//!
//!     let analysis = analyzer.analyze(&StockCode::new("600519")).await;
//!     for record in &analysis.annual {
//!         println!("{}: {:?}", record.report_date, record.net_revenue_yoy_growth);
//!     }
//! }
//! ```

// Core types and traits
pub use ashare_core::*;

// Analysis pipeline
pub use ashare_analysis::{DEFAULT_YEARS_BACK, analyze};

// Cache implementations
pub use ashare_cache::{InMemoryCache, NoopCache};

// Providers
#[cfg(feature = "eastmoney")]
pub use ashare_eastmoney::EastMoneyProvider;

mod analyzer;
pub use analyzer::StockAnalyzer;
