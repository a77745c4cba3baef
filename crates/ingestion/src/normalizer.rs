//! Trade record normalization.
//!
//! Activity records arrive as loosely-typed JSON objects whose fields may be
//! missing, null, numeric strings or plain garbage. The normalizer applies the
//! default-substitution rules once, at ingestion:
//! - `timestamp`: integer, float (truncated) or numeric string, else absent
//! - `usdcSize`: number or numeric string, else `0.0` (negative and
//!   non-finite values count as malformed)
//! - market: first non-empty of `slug` / `market`, else `""`
//! - `side`: string, else `""`

use discovery_core::{TimestampSecs, Trade};
use serde_json::{Map, Value};
use tracing::debug;

/// Fields tried, in order, for the market identifier.
const MARKET_KEYS: [&str; 2] = ["slug", "market"];

/// Statistics about ingestion quality.
#[derive(Debug, Clone, Default)]
pub struct NormalizationStats {
    /// Total records seen.
    pub total_records: u64,
    /// Records discarded because they were not JSON objects.
    pub discarded_records: u64,
    /// Records without a usable timestamp.
    pub missing_timestamp: u64,
    /// Records whose size was absent or malformed (defaulted to zero).
    pub defaulted_size: u64,
    /// Records without a market identifier.
    pub missing_market: u64,
    /// Records without a side.
    pub missing_side: u64,
}

impl NormalizationStats {
    /// Number of records turned into trades.
    pub fn accepted_records(&self) -> u64 {
        self.total_records - self.discarded_records
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Converts raw activity records into [`Trade`]s.
#[derive(Debug, Default)]
pub struct TradeNormalizer {
    stats: NormalizationStats,
}

impl TradeNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a single record. Non-object values are discarded.
    pub fn normalize(&mut self, value: &Value) -> Option<Trade> {
        self.stats.total_records += 1;

        let Some(obj) = value.as_object() else {
            self.stats.discarded_records += 1;
            return None;
        };

        let timestamp = parse_timestamp(obj.get("timestamp"));
        if timestamp.is_none() {
            self.stats.missing_timestamp += 1;
        }

        let usdc_size = match parse_size(obj.get("usdcSize")) {
            Some(size) => size,
            None => {
                self.stats.defaulted_size += 1;
                0.0
            }
        };

        let market = market_id(obj).unwrap_or_default();
        if market.is_empty() {
            self.stats.missing_market += 1;
        }

        let side = non_empty_str(obj.get("side")).unwrap_or_default();
        if side.is_empty() {
            self.stats.missing_side += 1;
        }

        Some(Trade {
            timestamp,
            usdc_size,
            market,
            side,
        })
    }

    /// Normalize a batch of records, dropping the ones that are not objects.
    pub fn normalize_batch(&mut self, values: &[Value]) -> Vec<Trade> {
        values.iter().filter_map(|v| self.normalize(v)).collect()
    }

    /// Normalize a raw response body.
    ///
    /// Only a JSON array is accepted; anything else (invalid JSON, an error
    /// object, a bare scalar) yields no trades.
    pub fn normalize_response(&mut self, body: &str) -> Vec<Trade> {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "response body is not JSON");
                return Vec::new();
            }
        };

        match value {
            Value::Array(items) => {
                let trades = self.normalize_batch(&items);
                debug!(
                    records = items.len(),
                    trades = trades.len(),
                    defaulted_size = self.stats.defaulted_size,
                    missing_timestamp = self.stats.missing_timestamp,
                    "normalized activity response"
                );
                trades
            }
            other => {
                debug!(kind = json_kind(&other), "response body is not a list");
                Vec::new()
            }
        }
    }

    /// Get normalization statistics.
    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

fn parse_timestamp(value: Option<&Value>) -> Option<TimestampSecs> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as TimestampSecs)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<TimestampSecs>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as TimestampSecs)
            })
        }
        _ => None,
    }
}

fn parse_size(value: Option<&Value>) -> Option<f64> {
    let size = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (size.is_finite() && size >= 0.0).then_some(size)
}

fn market_id(obj: &Map<String, Value>) -> Option<String> {
    MARKET_KEYS
        .iter()
        .find_map(|key| non_empty_str(obj.get(*key)))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
