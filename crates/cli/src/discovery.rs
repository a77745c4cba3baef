//! Address discovery.
//!
//! The leaderboard page embeds trader addresses in its markup; the most
//! frequently mentioned ones are taken as the most active traders.

use crate::http::{get_text, RetryPolicy};
use crate::pipeline::AddressSource;
use async_trait::async_trait;
use discovery_core::{Config, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, Url};
use std::collections::HashMap;
use tracing::info;

lazy_static! {
    static ref ADDRESS_RE: Regex =
        Regex::new(r"0x[a-fA-F0-9]{40}").expect("Invalid address pattern");
}

/// The `n` most frequent addresses in `html`.
///
/// Ties keep the order in which addresses first appear. Matching is exact:
/// the same address in different letter case counts separately.
pub fn extract_top_addresses(html: &str, n: usize) -> Vec<String> {
    // address -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, m) in ADDRESS_RE.find_iter(html).enumerate() {
        counts.entry(m.as_str()).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(addr, (count, first))| (addr, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(n)
        .map(|(addr, _, _)| addr.to_string())
        .collect()
}

/// Scrapes the leaderboard page for addresses.
pub struct LeaderboardDiscovery {
    client: Client,
    url: String,
    top_n: usize,
    retry: RetryPolicy,
}

impl LeaderboardDiscovery {
    /// Create a new leaderboard scraper.
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            url: config.discovery.leaderboard_url.clone(),
            top_n: config.discovery.top_n,
            retry: RetryPolicy::from_config(&config.fetch),
        }
    }

    /// Fetch the leaderboard and return its `n` most mentioned addresses.
    pub async fn discover(&self, n: usize) -> Result<Vec<String>> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::discovery(format!("bad leaderboard url {}: {e}", self.url)))?;
        let html = get_text(&self.client, &url, &self.retry).await?;
        let addresses = extract_top_addresses(&html, n);
        info!(
            url = %self.url,
            found = addresses.len(),
            requested = n,
            "scraped leaderboard"
        );
        Ok(addresses)
    }
}

#[async_trait]
impl AddressSource for LeaderboardDiscovery {
    async fn addresses(&self) -> Result<Vec<String>> {
        self.discover(self.top_n).await
    }
}

/// A fixed address list, e.g. from the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticAddresses {
    addresses: Vec<String>,
}

impl StaticAddresses {
    /// Create a source returning `addresses` as given.
    pub fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }
}

#[async_trait]
impl AddressSource for StaticAddresses {
    async fn addresses(&self) -> Result<Vec<String>> {
        Ok(self.addresses.clone())
    }
}
