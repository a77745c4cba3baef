//! Shared HTTP client and retry loop.
//!
//! Network failures (timeouts, refused or reset connections, no response)
//! are retried with exponential backoff. HTTP error statuses are not.

use discovery_core::{config::FetchConfig, Error, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::warn;

/// Build the HTTP client used for every request of a run.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| Error::config(format!("http client: {e}")))
}

/// Retry policy for transient network failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failure; doubled after each further one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy from fetch configuration.
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Delay before retrying after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

/// Whether a request error is worth retrying.
pub fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

async fn get_once(client: &Client, url: &Url) -> reqwest::Result<String> {
    client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// GET a URL and return the body text, retrying transient failures.
pub async fn get_text(client: &Client, url: &Url, policy: &RetryPolicy) -> Result<String> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match get_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) if is_transient(&e) && attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    %url,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "network error, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) if is_transient(&e) => {
                return Err(Error::fetch(format!(
                    "network failure after {max_attempts} attempts for {url}: {e}"
                )));
            }
            Err(e) => return Err(Error::fetch(format!("{url}: {e}"))),
        }
    }
}
