//! I/O layer for the trader discovery system.
//!
//! This crate provides:
//! - Leaderboard scraping for candidate addresses
//! - HTTP trade fetching with retry and backoff
//! - The sequential discovery pipeline feeding the analyzer

pub mod http;
pub mod discovery;
pub mod fetcher;
pub mod pipeline;

pub use discovery::{extract_top_addresses, LeaderboardDiscovery, StaticAddresses};
pub use fetcher::{normalize_body, HttpTradeFetcher};
pub use http::RetryPolicy;
pub use pipeline::{AddressSource, DiscoveryPipeline, FetchedTrades, TradeSource};
