//! Configuration structures for the trader discovery system.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for a discovery run.
///
/// Every section is optional in a config file; missing sections and fields
/// fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trade analysis parameters.
    pub analysis: AnalysisConfig,
    /// Arbitrage / market-maker classification thresholds.
    pub classifier: ClassifierConfig,
    /// Leaderboard discovery configuration.
    pub discovery: DiscoveryConfig,
    /// Trade fetch configuration.
    pub fetch: FetchConfig,
    /// Report output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.min_days_span.is_nan() || self.analysis.min_days_span <= 0.0 {
            return Err(Error::config("analysis.min_days_span must be > 0"));
        }
        if self.analysis.round_trip_window_secs < 0 {
            return Err(Error::config("analysis.round_trip_window_secs must be >= 0"));
        }
        if self.fetch.trade_limit == 0 {
            return Err(Error::config("fetch.trade_limit must be > 0"));
        }
        if self.fetch.max_retries == 0 {
            return Err(Error::config("fetch.max_retries must be >= 1"));
        }
        if self.output.dir.trim().is_empty() {
            return Err(Error::config("output.dir must not be empty"));
        }
        Ok(())
    }
}

/// Trade analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trades strictly below this size (USDC) are micro trades.
    pub micro_trade_usdc: f64,
    /// Maximum gap (seconds, inclusive) between the two legs of a round trip.
    pub round_trip_window_secs: i64,
    /// Floor for the observed span in days.
    pub min_days_span: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            micro_trade_usdc: 5.0,
            round_trip_window_secs: 60,
            min_days_span: 1e-6,
        }
    }
}

/// Classification thresholds. All comparisons are strict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// High-rate rule: trades/day must exceed this...
    pub high_rate_min_trades_per_day: f64,
    /// ...while the average trade size stays below this.
    pub high_rate_max_avg_usdc: f64,
    /// Micro-trade rule: micro ratio must exceed this...
    pub micro_ratio_min: f64,
    /// ...while trades/day exceeds this.
    pub micro_min_trades_per_day: f64,
    /// Round-trip rule: round-trip ratio must exceed this.
    pub round_trip_ratio_min: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            high_rate_min_trades_per_day: 500.0,
            high_rate_max_avg_usdc: 5.0,
            micro_ratio_min: 0.7,
            micro_min_trades_per_day: 200.0,
            round_trip_ratio_min: 0.05,
        }
    }
}

/// Leaderboard discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Leaderboard page scraped for addresses.
    pub leaderboard_url: String,
    /// Number of most frequent addresses to keep.
    pub top_n: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            leaderboard_url: "https://polymarket.com/leaderboard".to_string(),
            top_n: 50,
        }
    }
}

/// Trade fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Data API base URL.
    pub data_api_url: String,
    /// Maximum trades requested per address.
    pub trade_limit: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Pause between addresses (ms).
    pub request_delay_ms: u64,
    /// Attempts per request (including the first).
    pub max_retries: u32,
    /// Base backoff delay (ms), doubled after each failed attempt.
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            data_api_url: "https://data-api.polymarket.com".to_string(),
            trade_limit: 500,
            timeout_secs: 20,
            user_agent: "polymarket-discover/1.0".to_string(),
            request_delay_ms: 200,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the report files.
    pub dir: String,
    /// File name prefix, followed by the run timestamp.
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "trader_discovery_results".to_string(),
            file_prefix: "discovery".to_string(),
        }
    }
}
