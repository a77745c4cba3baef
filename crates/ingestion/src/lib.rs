//! Data ingestion and normalization for the trader discovery system.
//!
//! This crate handles:
//! - Tolerant decoding of activity records into typed trades
//! - Default substitution for missing or malformed fields
//! - Normalization of non-list API responses

pub mod normalizer;

pub use normalizer::{NormalizationStats, TradeNormalizer};
