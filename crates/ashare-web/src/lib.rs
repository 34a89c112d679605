#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Web interface for A-share statement analysis.
//!
//! A small JSON API over [`ashare`]: `/analyze` runs the full retrieval
//! and growth pipeline for a stock code, the `/starred` routes manage the
//! persistent watchlist, and `/prefetched` serves the cache-warmed popular
//! stocks. Numbers leave this layer already formatted for display.

/// Request error type.
pub mod error;
/// Display formatting for financial figures.
pub mod format;
/// HTTP routes.
pub mod routes;
/// Shared application state.
pub mod state;

pub use error::AppError;
pub use routes::app;
pub use state::AppState;
