//! market-pulse: the market statistics and temporal analytics engine behind
//! the resale tracker.
//!
//! Given a batch of observed sale prices for a product category, the engine
//! computes descriptive statistics, estimates the price distribution
//! (histogram + kernel density), detects seasonality and trend, flags change
//! points and volatility, and derives a competitive-position assessment.
//!
//! The engine is synchronous, stateless and pure: it knows nothing about
//! storage, sessions or transport. The persistence layer hands it an
//! [`model::AnalysisSnapshot`] with raw items; it hands back a fully
//! populated [`model::AdvancedMetrics`]. Sparse or malformed data degrades
//! to zeroed results instead of errors.

pub mod analyzer;
pub mod error;
pub mod model;
pub mod utils;

pub use analyzer::StatsEngine;
pub use error::AnalysisError;
pub use model::{AdvancedMetrics, AnalysisSnapshot, SnapshotComparison, TrendData};
