#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ashare-rs/ashare/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for processed stock analyses.
//!
//! This crate provides implementations of the [`AnalysisCache`] trait from
//! `ashare-core`:
//!
//! - [`InMemoryCache`] - TTL-aware in-memory cache
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use ashare_core::AnalysisCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
