//! # Sales Tracker Analytics Engine
//!
//! This crate turns a snapshot of ledger entries into summary statistics and
//! ordered listings. It is the only part of the system with real arithmetic.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of storage, HTTP or logging.
//!   It depends only on `core-types`.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. It takes
//!   already-fetched entries as input and produces `AggregateStats` as output, so
//!   concurrent requests never share anything.
//! - **One Sign Convention:** Every statistic is computed over signed amounts,
//!   income positive and expenses negative.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: aggregation, per-row annotation and range statistics.
//! - `AggregateStats` / `AggregatedEntry`: the statistics and the annotated row.
//! - `filter_by_range`: the inclusive date-range filter.
//! - `sorted_listing`: whitelisted multi-key ordering of a plain listing.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod filter;
pub mod listing;
pub mod percentile;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::filter_by_range;
pub use listing::sorted_listing;
pub use report::{AggregateStats, AggregatedEntry};
