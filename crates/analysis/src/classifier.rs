//! Arbitrage / market-maker classification.
//!
//! A trader is flagged when any one rule fires:
//! - high rate with small average size
//! - mostly micro trades at a moderate rate
//! - frequent round trips

use discovery_core::config::ClassifierConfig;
use serde::Serialize;

/// Metrics the classification rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraderProfile {
    /// Trades per day.
    pub trades_per_day: f64,
    /// Mean trade size (USDC).
    pub avg_trade_usdc: f64,
    /// Fraction of micro trades.
    pub micro_trade_ratio: f64,
    /// Round trips per trade.
    pub round_trip_ratio: f64,
}

/// A single classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassificationRule {
    /// trades/day above the high-rate floor with a small average size.
    HighRateSmallSize,
    /// Mostly micro trades at a moderate rate.
    MicroTradeHeavy,
    /// Round-trip ratio above the floor.
    RoundTripping,
}

impl ClassificationRule {
    /// All rules, in evaluation order.
    pub const ALL: [ClassificationRule; 3] = [
        ClassificationRule::HighRateSmallSize,
        ClassificationRule::MicroTradeHeavy,
        ClassificationRule::RoundTripping,
    ];

    /// Short label for logs.
    pub fn label(self) -> &'static str {
        match self {
            ClassificationRule::HighRateSmallSize => "high-rate-small-size",
            ClassificationRule::MicroTradeHeavy => "micro-trade-heavy",
            ClassificationRule::RoundTripping => "round-tripping",
        }
    }
}

/// Applies the classification thresholds.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageClassifier {
    config: ClassifierConfig,
}

impl ArbitrageClassifier {
    /// Create a new classifier.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Get the thresholds in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Check a single rule.
    pub fn rule_matches(&self, rule: ClassificationRule, profile: &TraderProfile) -> bool {
        let c = &self.config;
        match rule {
            ClassificationRule::HighRateSmallSize => {
                profile.trades_per_day > c.high_rate_min_trades_per_day
                    && profile.avg_trade_usdc < c.high_rate_max_avg_usdc
            }
            ClassificationRule::MicroTradeHeavy => {
                profile.micro_trade_ratio > c.micro_ratio_min
                    && profile.trades_per_day > c.micro_min_trades_per_day
            }
            ClassificationRule::RoundTripping => profile.round_trip_ratio > c.round_trip_ratio_min,
        }
    }

    /// Rules that fire for this profile.
    pub fn matched_rules(&self, profile: &TraderProfile) -> Vec<ClassificationRule> {
        ClassificationRule::ALL
            .into_iter()
            .filter(|&rule| self.rule_matches(rule, profile))
            .collect()
    }

    /// Whether the profile looks like arbitrage or market making.
    pub fn classify(&self, profile: &TraderProfile) -> bool {
        ClassificationRule::ALL
            .into_iter()
            .any(|rule| self.rule_matches(rule, profile))
    }
}
