//! Trade analysis for the trader discovery system.
//!
//! This crate handles:
//! - Trade size distribution (mean, median, micro-trade ratio)
//! - Round-trip detection (quick opposite-side trades on one market)
//! - Arbitrage / market-maker classification
//! - Per-address aggregation into an `AnalysisResult`

pub mod size_stats;
pub mod round_trip;
pub mod classifier;
pub mod analyzer;

pub use size_stats::SizeDistribution;
pub use round_trip::RoundTripDetector;
pub use classifier::{ArbitrageClassifier, ClassificationRule, TraderProfile};
pub use analyzer::TradeAnalyzer;
