//! Run summary.
//!
//! Counts over a finished result list, logged at the end of a run.

use discovery_core::DiscoveryEntry;
use serde::Serialize;

/// Summary counts for one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Addresses processed.
    pub addresses: usize,
    /// Addresses with an analysis.
    pub analyzed: usize,
    /// Addresses without an analysis (no usable trades).
    pub skipped: usize,
    /// Addresses flagged as likely arbitrage / market making.
    pub flagged: usize,
    /// Trade records fetched across all addresses.
    pub total_trades: usize,
    /// Round trips detected across all addresses.
    pub total_round_trips: usize,
    /// flagged / analyzed.
    pub flagged_ratio: f64,
}

impl ReportSummary {
    /// Summarize a result list.
    pub fn from_entries(entries: &[DiscoveryEntry]) -> Self {
        let mut summary = Self {
            addresses: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            summary.total_trades += entry.trades_fetched;
            match &entry.analysis {
                Some(analysis) => {
                    summary.analyzed += 1;
                    summary.total_round_trips += analysis.round_trips;
                    if analysis.likely_arbitrage_or_maker {
                        summary.flagged += 1;
                    }
                }
                None => summary.skipped += 1,
            }
        }

        summary.flagged_ratio = if summary.analyzed > 0 {
            summary.flagged as f64 / summary.analyzed as f64
        } else {
            0.0
        };

        summary
    }

    /// Addresses flagged, in input order.
    pub fn flagged_addresses(entries: &[DiscoveryEntry]) -> Vec<&str> {
        entries
            .iter()
            .filter(|e| e.is_flagged())
            .map(|e| e.address.as_str())
            .collect()
    }
}
