//! Discovery pipeline.
//!
//! Addresses are processed one at a time with a pause between requests.
//! A failed fetch is logged and recorded as zero trades; it never aborts
//! the run.

use async_trait::async_trait;
use discovery_analysis::TradeAnalyzer;
use discovery_core::{Config, DiscoveryEntry, Result, Trade};
use std::time::Duration;
use tracing::{info, warn};

/// Source of candidate addresses.
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn addresses(&self) -> Result<Vec<String>>;
}

/// Trades fetched for one address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedTrades {
    /// Records in the response, including ones that could not be normalized.
    pub records: usize,
    /// Normalized trades.
    pub trades: Vec<Trade>,
}

impl FetchedTrades {
    /// A batch in which every record became a trade.
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        Self {
            records: trades.len(),
            trades,
        }
    }
}

/// Source of one address's recent trades.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn fetch_trades(&self, address: &str) -> Result<FetchedTrades>;
}

/// Fetches and analyzes each address in turn.
#[derive(Debug, Clone)]
pub struct DiscoveryPipeline {
    analyzer: TradeAnalyzer,
    request_delay: Duration,
}

impl DiscoveryPipeline {
    /// Create a new pipeline from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            analyzer: TradeAnalyzer::new(config),
            request_delay: Duration::from_millis(config.fetch.request_delay_ms),
        }
    }

    /// Override the pause between addresses.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Analyzer used for each address.
    pub fn analyzer(&self) -> &TradeAnalyzer {
        &self.analyzer
    }

    /// Build the report entry for one address.
    ///
    /// `trades_fetched` is the raw record count of the response.
    pub fn analyze_address(&self, address: &str, fetched: &FetchedTrades) -> DiscoveryEntry {
        DiscoveryEntry::new(address, fetched.records, self.analyzer.analyze(&fetched.trades))
    }

    /// Process `addresses` in order, one entry per address.
    pub async fn run(&self, addresses: &[String], source: &dyn TradeSource) -> Vec<DiscoveryEntry> {
        let total = addresses.len();
        let mut entries = Vec::with_capacity(total);

        for (i, address) in addresses.iter().enumerate() {
            let fetched = match source.fetch_trades(address).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!(address = %address, error = %e, "fetch failed, recording zero trades");
                    FetchedTrades::default()
                }
            };

            let entry = self.analyze_address(address, &fetched);
            info!(
                index = i + 1,
                total,
                address = %address,
                trades = entry.trades_fetched,
                flagged = entry.is_flagged(),
                "analyzed address"
            );
            entries.push(entry);

            if i + 1 < total && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_core::Error;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory trade source that records which addresses were requested.
    #[derive(Default)]
    struct MockSource {
        trades: HashMap<String, FetchedTrades>,
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TradeSource for MockSource {
        async fn fetch_trades(&self, address: &str) -> Result<FetchedTrades> {
            self.calls.lock().unwrap().push(address.to_string());
            if self.failing.iter().any(|a| a == address) {
                return Err(Error::fetch("connection reset"));
            }
            Ok(self.trades.get(address).cloned().unwrap_or_default())
        }
    }

    fn pipeline() -> DiscoveryPipeline {
        DiscoveryPipeline::new(&Config::default()).with_request_delay(Duration::ZERO)
    }

    fn busy_trader() -> Vec<Trade> {
        // 600 trades of 2 USDC spread over one day.
        (0..600)
            .map(|i| {
                let side = if i % 2 == 0 { "BUY" } else { "SELL" };
                Trade::new(Some(i * 86_400 / 599), 2.0, format!("m{}", i % 3), side)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_run_preserves_order_and_handles_failures() {
        let mut source = MockSource::default();
        source
            .trades
            .insert("0xbusy".into(), FetchedTrades::from_trades(busy_trader()));
        source.trades.insert(
            "0xcasual".into(),
            FetchedTrades::from_trades(vec![
                Trade::new(Some(0), 100.0, "m1", "BUY"),
                Trade::new(Some(86_400 * 10), 300.0, "m2", "SELL"),
            ]),
        );
        source.failing.push("0xdown".into());

        let addresses: Vec<String> = ["0xbusy", "0xdown", "0xcasual", "0xempty"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let entries = pipeline().run(&addresses, &source).await;

        assert_eq!(entries.len(), 4);
        let order: Vec<&str> = entries.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(order, vec!["0xbusy", "0xdown", "0xcasual", "0xempty"]);
        assert_eq!(*source.calls.lock().unwrap(), addresses);

        assert_eq!(entries[0].trades_fetched, 600);
        assert!(entries[0].is_flagged());

        assert_eq!(entries[1].trades_fetched, 0);
        assert!(entries[1].analysis.is_none());

        let casual = entries[2].analysis.as_ref().unwrap();
        assert_eq!(casual.count, 2);
        assert!(!casual.likely_arbitrage_or_maker);

        assert!(entries[3].analysis.is_none());
    }

    #[tokio::test]
    async fn test_run_empty_address_list() {
        let entries = pipeline().run(&[], &MockSource::default()).await;
        assert!(entries.is_empty());
    }

    #[test]
    fn test_analyze_address_without_timestamps() {
        let fetched = FetchedTrades::from_trades(vec![
            Trade::new(None, 10.0, "m1", "BUY"),
            Trade::new(None, 10.0, "m1", "SELL"),
        ]);
        let entry = pipeline().analyze_address("0xabc", &fetched);

        assert_eq!(entry.trades_fetched, 2);
        assert!(entry.analysis.is_none());
        assert!(!entry.is_flagged());
    }

    #[test]
    fn test_trades_fetched_counts_discarded_records() {
        // Three records in the response, one of them not an object
        let fetched = FetchedTrades {
            records: 3,
            trades: vec![
                Trade::new(Some(0), 10.0, "m1", "BUY"),
                Trade::new(Some(3_600), 10.0, "m2", "SELL"),
            ],
        };
        let entry = pipeline().analyze_address("0xabc", &fetched);

        assert_eq!(entry.trades_fetched, 3);
        assert_eq!(entry.analysis.as_ref().unwrap().count, 2);
    }

    #[test]
    fn test_request_delay_from_config() {
        let mut config = Config::default();
        config.fetch.request_delay_ms = 750;
        let pipeline = DiscoveryPipeline::new(&config);
        assert_eq!(pipeline.request_delay, Duration::from_millis(750));
    }
}
