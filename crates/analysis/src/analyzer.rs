//! Trade analyzer.
//!
//! Combines the size distribution, round-trip detector and classifier into a
//! single pass over one trader's history.

use crate::{
    classifier::{ArbitrageClassifier, TraderProfile},
    round_trip::RoundTripDetector,
    size_stats::SizeDistribution,
};
use discovery_core::{
    config::AnalysisConfig, AnalysisResult, Config, TimestampSecs, Trade, SECONDS_PER_DAY,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Per-address trade analyzer.
///
/// Holds only configuration, so one analyzer can be shared across addresses
/// and threads.
#[derive(Debug, Clone)]
pub struct TradeAnalyzer {
    /// Analysis parameters.
    config: AnalysisConfig,
    /// Round-trip detector.
    detector: RoundTripDetector,
    /// Classification rules.
    classifier: ArbitrageClassifier,
}

impl TradeAnalyzer {
    /// Create a new analyzer from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.analysis.clone(),
            detector: RoundTripDetector::new(config.analysis.round_trip_window_secs),
            classifier: ArbitrageClassifier::new(config.classifier.clone()),
        }
    }

    /// Analyze one trader's trades.
    ///
    /// Returns `None` when there is nothing to analyze: an empty list, or a
    /// list in which no trade carries a timestamp.
    pub fn analyze(&self, trades: &[Trade]) -> Option<AnalysisResult> {
        if trades.is_empty() {
            return None;
        }

        let Some((first_ts, last_ts)) = time_bounds(trades) else {
            warn!(count = trades.len(), "no trade carries a timestamp, skipping analysis");
            return None;
        };

        let count = trades.len();
        let days_span =
            ((last_ts - first_ts) as f64 / SECONDS_PER_DAY).max(self.config.min_days_span);
        let trades_per_day = count as f64 / days_span;

        let sizes: Vec<f64> = trades.iter().map(|t| t.usdc_size).collect();
        let sizes = SizeDistribution::from_sizes(&sizes, self.config.micro_trade_usdc)?;

        let markets_count = trades
            .iter()
            .map(|t| t.market.as_str())
            .collect::<HashSet<_>>()
            .len();

        let round_trips = self.detector.count(trades);
        let round_trip_ratio = round_trips as f64 / count.max(1) as f64;

        let profile = TraderProfile {
            trades_per_day,
            avg_trade_usdc: sizes.mean,
            micro_trade_ratio: sizes.micro_ratio,
            round_trip_ratio,
        };
        let rules = self.classifier.matched_rules(&profile);

        debug!(
            count,
            days_span,
            trades_per_day,
            round_trips,
            rules = ?rules.iter().map(|r| r.label()).collect::<Vec<_>>(),
            "analyzed trades"
        );

        Some(AnalysisResult {
            count,
            first_ts,
            last_ts,
            days_span,
            trades_per_day,
            avg_trade_usdc: sizes.mean,
            median_trade_usdc: sizes.median,
            micro_trade_ratio: sizes.micro_ratio,
            markets_count,
            round_trips,
            round_trip_ratio,
            likely_arbitrage_or_maker: !rules.is_empty(),
        })
    }

    /// Get the round-trip detector.
    pub fn detector(&self) -> &RoundTripDetector {
        &self.detector
    }

    /// Get the classifier.
    pub fn classifier(&self) -> &ArbitrageClassifier {
        &self.classifier
    }
}

impl Default for TradeAnalyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Oldest and newest present timestamp.
fn time_bounds(trades: &[Trade]) -> Option<(TimestampSecs, TimestampSecs)> {
    trades
        .iter()
        .filter_map(|t| t.timestamp)
        .fold(None, |bounds, ts| match bounds {
            None => Some((ts, ts)),
            Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BASE_TS: i64 = 1_704_067_200; // 2024-01-01 00:00:00 UTC

    fn make_trade(offset: i64, size: f64, market: &str, side: &str) -> Trade {
        Trade::new(Some(BASE_TS + offset), size, market, side)
    }

    /// Deterministic mixed history: several markets, sides, sizes and gaps.
    fn mixed_history(n: usize) -> Vec<Trade> {
        let markets = ["btc-up", "election", "rain", ""];
        let sides = ["BUY", "SELL", "BUY", ""];
        (0..n)
            .map(|i| {
                let ts = if i % 7 == 3 {
                    None
                } else {
                    Some(BASE_TS + (i as i64 * 37) % 5000)
                };
                Trade::new(
                    ts,
                    (i % 13) as f64 * 1.5,
                    markets[i % markets.len()],
                    sides[(i / 2) % sides.len()],
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_is_none() {
        let analyzer = TradeAnalyzer::default();
        assert!(analyzer.analyze(&[]).is_none());
    }

    #[test]
    fn test_all_timestamps_missing_is_none() {
        let analyzer = TradeAnalyzer::default();
        let trades = vec![
            Trade::new(None, 10.0, "m", "BUY"),
            Trade::new(None, 10.0, "m", "SELL"),
        ];
        assert!(analyzer.analyze(&trades).is_none());
    }

    #[test]
    fn test_basic_metrics() {
        let analyzer = TradeAnalyzer::default();
        let trades = vec![
            make_trade(0, 2.0, "a", "BUY"),
            make_trade(43_200, 10.0, "b", "BUY"),
            make_trade(86_400, 3.0, "a", "SELL"),
            make_trade(172_800, 100.0, "c", "SELL"),
        ];

        let result = analyzer.analyze(&trades).unwrap();

        assert_eq!(result.count, 4);
        assert_eq!(result.first_ts, BASE_TS);
        assert_eq!(result.last_ts, BASE_TS + 172_800);
        assert_relative_eq!(result.days_span, 2.0);
        assert_relative_eq!(result.trades_per_day, 2.0);
        assert_relative_eq!(result.avg_trade_usdc, 28.75, epsilon = 1e-9);
        assert_relative_eq!(result.median_trade_usdc, 6.5, epsilon = 1e-9);
        assert_relative_eq!(result.micro_trade_ratio, 0.5);
        assert_eq!(result.markets_count, 3);
        assert_eq!(result.round_trips, 0);
        assert_eq!(result.round_trip_ratio, 0.0);
        assert!(!result.likely_arbitrage_or_maker);
    }

    #[test]
    fn test_single_timestamp_uses_span_floor() {
        let analyzer = TradeAnalyzer::default();
        let trades = vec![
            make_trade(0, 50.0, "a", "BUY"),
            make_trade(0, 50.0, "b", "BUY"),
        ];

        let result = analyzer.analyze(&trades).unwrap();

        assert_relative_eq!(result.days_span, 1e-6);
        assert_relative_eq!(result.trades_per_day, 2.0e6, max_relative = 1e-9);
        // Rate is huge but trades are large and there are no round trips
        assert!(!result.likely_arbitrage_or_maker);
    }

    #[test]
    fn test_partial_timestamps() {
        let analyzer = TradeAnalyzer::default();
        let trades = vec![
            make_trade(0, 10.0, "a", "BUY"),
            Trade::new(None, 10.0, "a", "SELL"),
            make_trade(86_400, 10.0, "a", "SELL"),
        ];

        let result = analyzer.analyze(&trades).unwrap();

        assert_eq!(result.count, 3);
        assert_eq!(result.first_ts, BASE_TS);
        assert_relative_eq!(result.days_span, 1.0);
    }

    #[test]
    fn test_round_trip_flags_trader() {
        let analyzer = TradeAnalyzer::default();
        // 2 round trips out of 10 trades, sizes large, low rate
        let mut trades: Vec<Trade> = (0..8)
            .map(|i| make_trade(i * 10_000, 100.0, &format!("m{i}"), "BUY"))
            .collect();
        trades.push(make_trade(200_000, 100.0, "x", "BUY"));
        trades.push(make_trade(200_030, 100.0, "x", "SELL"));
        trades.push(make_trade(200_055, 100.0, "x", "BUY"));

        let result = analyzer.analyze(&trades).unwrap();

        assert_eq!(result.round_trips, 2);
        assert_relative_eq!(result.round_trip_ratio, 2.0 / 11.0);
        assert!(result.likely_arbitrage_or_maker);
    }

    #[test]
    fn test_high_rate_micro_trader_flagged() {
        let analyzer = TradeAnalyzer::default();
        // 1000 same-side $2 trades over ~1 day
        let trades: Vec<Trade> = (0..1000)
            .map(|i| make_trade(i * 86, 2.0, "m", "BUY"))
            .collect();

        let result = analyzer.analyze(&trades).unwrap();

        assert!(result.trades_per_day > 500.0);
        assert_relative_eq!(result.avg_trade_usdc, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.micro_trade_ratio, 1.0);
        assert_eq!(result.round_trips, 0);
        assert!(result.likely_arbitrage_or_maker);
    }

    #[test]
    fn test_count_matches_input_and_ratios_bounded() {
        let analyzer = TradeAnalyzer::default();
        for n in [1, 2, 5, 17, 64, 301] {
            let trades = mixed_history(n);
            let result = analyzer.analyze(&trades).unwrap();

            assert_eq!(result.count, n);
            assert!((0.0..=1.0).contains(&result.micro_trade_ratio));
            assert!(result.round_trip_ratio >= 0.0);
            assert!(result.days_span > 0.0);
        }
    }

    #[test]
    fn test_idempotent() {
        let analyzer = TradeAnalyzer::default();
        let trades = mixed_history(120);
        assert_eq!(analyzer.analyze(&trades), analyzer.analyze(&trades));
    }

    #[test]
    fn test_input_order_does_not_matter_for_round_trips() {
        let analyzer = TradeAnalyzer::default();
        let mut trades = vec![
            make_trade(0, 1.0, "m", "BUY"),
            make_trade(30, 1.0, "m", "SELL"),
            make_trade(55, 1.0, "m", "BUY"),
        ];
        let forward = analyzer.analyze(&trades).unwrap();
        trades.reverse();
        let backward = analyzer.analyze(&trades).unwrap();

        assert_eq!(forward.round_trips, 2);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_from_normalized_records() {
        use discovery_ingestion::TradeNormalizer;

        let body = r#"[
            {"timestamp": 1704067200, "usdcSize": "1.5", "slug": "btc-up", "side": "BUY"},
            {"timestamp": 1704067240, "usdcSize": "oops", "slug": "btc-up", "side": "SELL"},
            {"timestamp": 1704153600, "usdcSize": 20, "market": "0xabc", "side": "BUY"}
        ]"#;
        let trades = TradeNormalizer::new().normalize_response(body);
        let result = TradeAnalyzer::default().analyze(&trades).unwrap();

        assert_eq!(result.count, 3);
        assert_eq!(result.markets_count, 2);
        assert_eq!(result.round_trips, 1);
        assert_relative_eq!(result.micro_trade_ratio, 2.0 / 3.0);
        assert_relative_eq!(result.median_trade_usdc, 1.5, epsilon = 1e-9);
        assert!(result.likely_arbitrage_or_maker);
    }
}
