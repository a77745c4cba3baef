//! Trade fetching from the Polymarket data API.

use crate::http::{get_text, RetryPolicy};
use crate::pipeline::{FetchedTrades, TradeSource};
use async_trait::async_trait;
use discovery_core::{config::FetchConfig, Error, Result};
use discovery_ingestion::TradeNormalizer;
use reqwest::{Client, Url};
use tracing::debug;

/// Build the activity URL for one address.
pub fn activity_url(base: &str, address: &str, limit: usize) -> Result<Url> {
    let endpoint = format!("{}/activity", base.trim_end_matches('/'));
    let limit = limit.to_string();
    Url::parse_with_params(
        &endpoint,
        [
            ("user", address),
            ("type", "TRADE"),
            ("limit", limit.as_str()),
        ],
    )
    .map_err(|e| Error::fetch(format!("bad activity url {endpoint}: {e}")))
}

/// Fetches recent trades over HTTP.
pub struct HttpTradeFetcher {
    client: Client,
    base_url: String,
    limit: usize,
    retry: RetryPolicy,
}

impl HttpTradeFetcher {
    /// Create a fetcher sharing `client`.
    pub fn new(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            base_url: config.data_api_url.clone(),
            limit: config.trade_limit,
            retry: RetryPolicy::from_config(config),
        }
    }

    /// Records requested per address.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[async_trait]
impl TradeSource for HttpTradeFetcher {
    async fn fetch_trades(&self, address: &str) -> Result<FetchedTrades> {
        let url = activity_url(&self.base_url, address, self.limit)?;
        let body = get_text(&self.client, &url, &self.retry).await?;
        Ok(normalize_body(address, &body))
    }
}

/// Normalize an activity response, keeping the raw record count.
pub fn normalize_body(address: &str, body: &str) -> FetchedTrades {
    let mut normalizer = TradeNormalizer::new();
    let trades = normalizer.normalize_response(body);
    let stats = normalizer.stats();
    debug!(
        address,
        records = stats.total_records,
        accepted = stats.accepted_records(),
        missing_timestamp = stats.missing_timestamp,
        defaulted_size = stats.defaulted_size,
        "fetched trades"
    );
    FetchedTrades {
        records: stats.total_records as usize,
        trades,
    }
}
