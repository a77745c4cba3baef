//! Core data types for the trader discovery system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp in seconds since Unix epoch (UTC).
pub type TimestampSecs = i64;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a timestamp to a UTC datetime.
#[inline]
pub fn ts_to_datetime(ts: TimestampSecs) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// A single trade from a trader's activity history.
///
/// Built by the ingestion layer, which applies the default-substitution
/// rules: a missing or malformed size becomes `0.0`, a missing market or
/// side becomes the empty string. Only the timestamp keeps its absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Timestamp in seconds, if the record carried one.
    pub timestamp: Option<TimestampSecs>,
    /// Notional size in USDC (never negative).
    pub usdc_size: f64,
    /// Market identifier (slug or market id), empty if unknown.
    pub market: String,
    /// Trade direction token (e.g. "BUY"/"SELL"), empty if unknown.
    pub side: String,
}

impl Trade {
    /// Create a new trade.
    pub fn new(
        timestamp: Option<TimestampSecs>,
        usdc_size: f64,
        market: impl Into<String>,
        side: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            usdc_size,
            market: market.into(),
            side: side.into(),
        }
    }

    /// Ordering key: a missing timestamp sorts as epoch zero.
    #[inline]
    pub fn sort_key(&self) -> TimestampSecs {
        self.timestamp.unwrap_or(0)
    }

    /// Whether the trade carries a side token.
    #[inline]
    pub fn has_side(&self) -> bool {
        !self.side.is_empty()
    }

    /// Whether both trades carry a side and the sides differ.
    #[inline]
    pub fn is_opposite_side(&self, other: &Trade) -> bool {
        self.has_side() && other.has_side() && self.side != other.side
    }
}

/// Per-address analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Number of trades analyzed (always >= 1).
    pub count: usize,
    /// Oldest present timestamp.
    pub first_ts: TimestampSecs,
    /// Newest present timestamp.
    pub last_ts: TimestampSecs,
    /// Elapsed days between first and last trade, floored at a small epsilon.
    pub days_span: f64,
    /// count / days_span.
    pub trades_per_day: f64,
    /// Mean trade size.
    pub avg_trade_usdc: f64,
    /// Median trade size.
    pub median_trade_usdc: f64,
    /// Fraction of trades below the micro-trade threshold.
    pub micro_trade_ratio: f64,
    /// Number of distinct market identifiers.
    pub markets_count: usize,
    /// Adjacent opposite-side pairs inside the round-trip window.
    pub round_trips: usize,
    /// round_trips / count.
    pub round_trip_ratio: f64,
    /// Heuristic arbitrage / market-maker flag.
    pub likely_arbitrage_or_maker: bool,
}

impl AnalysisResult {
    /// Time of the newest trade.
    pub fn last_trade_time(&self) -> Option<DateTime<Utc>> {
        ts_to_datetime(self.last_ts)
    }
}

/// One row of the discovery report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    /// Trader address (0x-prefixed, not validated).
    pub address: String,
    /// Number of trade records fetched for the address.
    pub trades_fetched: usize,
    /// Analysis, or `None` when nothing could be analyzed.
    pub analysis: Option<AnalysisResult>,
}

impl DiscoveryEntry {
    /// Create a new entry.
    pub fn new(
        address: impl Into<String>,
        trades_fetched: usize,
        analysis: Option<AnalysisResult>,
    ) -> Self {
        Self {
            address: address.into(),
            trades_fetched,
            analysis,
        }
    }

    /// Whether the address was flagged as likely arbitrage / market making.
    pub fn is_flagged(&self) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|a| a.likely_arbitrage_or_maker)
    }
}
