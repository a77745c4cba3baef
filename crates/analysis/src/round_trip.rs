//! Round-trip detection.
//!
//! A round trip is a pair of time-adjacent trades on the same market with
//! opposite sides, the second leg no more than `window_secs` after the first.
//! Every adjacent pair is checked, so a trade sitting between two
//! opposite-side neighbours contributes to two round trips.

use discovery_core::Trade;
use std::collections::BTreeMap;

/// Default round-trip window (seconds).
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Group trades by market identifier, preserving input order within a group.
pub fn group_by_market(trades: &[Trade]) -> BTreeMap<&str, Vec<&Trade>> {
    let mut groups: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        groups.entry(trade.market.as_str()).or_default().push(trade);
    }
    groups
}

/// Counts round trips in a trader's history.
#[derive(Debug, Clone)]
pub struct RoundTripDetector {
    /// Maximum gap between legs (seconds, inclusive).
    window_secs: i64,
}

impl RoundTripDetector {
    /// Create a new detector.
    pub fn new(window_secs: i64) -> Self {
        Self { window_secs }
    }

    /// Get the window size in seconds.
    pub fn window_secs(&self) -> i64 {
        self.window_secs
    }

    /// Count round trips over all markets.
    ///
    /// Trades without a market identifier are never paired.
    pub fn count(&self, trades: &[Trade]) -> usize {
        group_by_market(trades)
            .into_iter()
            .filter(|(market, _)| !market.is_empty())
            .map(|(_, mut group)| self.count_in_market(&mut group))
            .sum()
    }

    /// Count round trips among trades of a single market.
    ///
    /// Sorts `trades` in place by timestamp (stable, missing timestamps first).
    pub fn count_in_market(&self, trades: &mut [&Trade]) -> usize {
        trades.sort_by_key(|t| t.sort_key());
        trades
            .windows(2)
            .filter(|pair| self.is_round_trip(pair[0], pair[1]))
            .count()
    }

    /// Check whether `b`, following `a` in time, closes a round trip.
    pub fn is_round_trip(&self, a: &Trade, b: &Trade) -> bool {
        if !a.is_opposite_side(b) {
            return false;
        }
        match (a.timestamp, b.timestamp) {
            (Some(ts_a), Some(ts_b)) => (0..=self.window_secs).contains(&(ts_b - ts_a)),
            _ => false,
        }
    }
}

impl Default for RoundTripDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}
