//! JSON rendering.

use discovery_core::{DiscoveryEntry, Result};

/// Render entries as a pretty-printed JSON array with full numeric precision.
pub fn render_json(entries: &[DiscoveryEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_core::AnalysisResult;
    use serde_json::Value;

    #[test]
    fn test_fields_and_precision() {
        let analysis = AnalysisResult {
            count: 3,
            first_ts: 100,
            last_ts: 200,
            days_span: 100.0 / 86_400.0,
            trades_per_day: 2592.0,
            avg_trade_usdc: 1.0 / 3.0,
            median_trade_usdc: 0.5,
            micro_trade_ratio: 1.0,
            markets_count: 1,
            round_trips: 2,
            round_trip_ratio: 2.0 / 3.0,
            likely_arbitrage_or_maker: true,
        };
        let entries = vec![
            DiscoveryEntry::new("0xaaa", 3, Some(analysis)),
            DiscoveryEntry::new("0xbbb", 0, None),
        ];

        let json: Value = serde_json::from_str(&render_json(&entries).unwrap()).unwrap();

        let first = &json[0];
        assert_eq!(first["address"], "0xaaa");
        assert_eq!(first["trades_fetched"], 3);
        assert_eq!(first["analysis"]["round_trips"], 2);
        assert_eq!(first["analysis"]["likely_arbitrage_or_maker"], true);
        assert_eq!(first["analysis"]["avg_trade_usdc"].as_f64(), Some(1.0 / 3.0));
        assert!(json[1]["analysis"].is_null());
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
