//! Flat CSV rendering.
//!
//! One row per address. Ratios and sizes are rounded for reading; the JSON
//! report keeps full precision.

use csv::{Terminator, WriterBuilder};
use discovery_core::{DiscoveryEntry, Error, Result};
use serde::Serialize;

/// CSV column names, in order.
pub const CSV_HEADER: [&str; 10] = [
    "address",
    "trades_fetched",
    "last_trade",
    "trades_per_day",
    "avg_trade_usdc",
    "median_trade_usdc",
    "micro_trade_ratio",
    "markets_count",
    "round_trip_ratio",
    "likely_arbitrage",
];

/// A formatted CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub address: String,
    pub trades_fetched: usize,
    /// `YYYY-MM-DDTHH:MM:SSZ`, empty without analysis.
    pub last_trade: String,
    pub trades_per_day: String,
    pub avg_trade_usdc: String,
    pub median_trade_usdc: String,
    pub micro_trade_ratio: String,
    pub markets_count: String,
    pub round_trip_ratio: String,
    /// `True` / `False`.
    pub likely_arbitrage: &'static str,
}

impl CsvRow {
    /// Format an entry. Entries without analysis get empty metric columns.
    pub fn from_entry(entry: &DiscoveryEntry) -> Self {
        match &entry.analysis {
            Some(a) => Self {
                address: entry.address.clone(),
                trades_fetched: entry.trades_fetched,
                last_trade: a
                    .last_trade_time()
                    .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
                    .unwrap_or_default(),
                trades_per_day: format!("{:.2}", a.trades_per_day),
                avg_trade_usdc: format!("{:.2}", a.avg_trade_usdc),
                median_trade_usdc: format!("{:.2}", a.median_trade_usdc),
                micro_trade_ratio: format!("{:.2}", a.micro_trade_ratio),
                markets_count: a.markets_count.to_string(),
                round_trip_ratio: format!("{:.3}", a.round_trip_ratio),
                likely_arbitrage: bool_text(a.likely_arbitrage_or_maker),
            },
            None => Self {
                address: entry.address.clone(),
                trades_fetched: entry.trades_fetched,
                last_trade: String::new(),
                trades_per_day: String::new(),
                avg_trade_usdc: String::new(),
                median_trade_usdc: String::new(),
                micro_trade_ratio: String::new(),
                markets_count: String::new(),
                round_trip_ratio: String::new(),
                likely_arbitrage: bool_text(false),
            },
        }
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Render entries as CSV, header included even when there are no rows.
pub fn render_csv(entries: &[DiscoveryEntry]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| Error::report(format!("csv header: {e}")))?;
    for entry in entries {
        writer
            .serialize(CsvRow::from_entry(entry))
            .map_err(|e| Error::report(format!("csv row for {}: {e}", entry.address)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::report(format!("csv flush: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::report(format!("csv encoding: {e}")))
}
