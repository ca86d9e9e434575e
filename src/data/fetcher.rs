use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const COINGECKO_SIMPLE_PRICE: &str = "https://api.coingecko.com/api/v3/simple/price";
const MAX_ATTEMPTS: u32 = 3;
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// AFN quote per CoinGecko id. Ids whose quote did not resolve to a
/// finite number are simply absent and render as a placeholder.
pub type PriceMap = HashMap<String, f64>;

/// Closed classification of a failed fetch attempt. Every class is
/// retried; the distinction only feeds the log line.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("rate limited (429)")]
    RateLimited,
    #[error("upstream unavailable ({0})")]
    Unavailable(StatusCode),
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchFailure {
    fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            429 => Self::RateLimited,
            502 | 503 | 504 => Self::Unavailable(status),
            _ => Self::UnexpectedStatus(status),
        }
    }
}

pub struct PriceFetcher {
    client: reqwest::Client,
    endpoint: String,
    vs_currency: String,
    backoff_base: Duration,
}

impl PriceFetcher {
    pub fn new(vs_currency: &str) -> reqwest::Result<Self> {
        Self::with_endpoint(COINGECKO_SIMPLE_PRICE, vs_currency, Duration::from_secs(1))
    }

    /// Endpoint and backoff base are injectable so tests can point at a
    /// local server and keep the sleeps short.
    pub fn with_endpoint(
        endpoint: &str,
        vs_currency: &str,
        backoff_base: Duration,
    ) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(ATTEMPT_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            vs_currency: vs_currency.to_string(),
            backoff_base,
        })
    }

    /// Fetch quotes for `ids` with retries and exponential backoff.
    /// Exhausting all attempts is not an error: missing entries render
    /// as dashes, so a flaky price service never blocks the update.
    pub async fn fetch(&self, ids: &[&str]) -> PriceMap {
        let joined = ids.join(",");
        for attempt in 0..MAX_ATTEMPTS {
            match self.attempt(&joined).await {
                Ok(prices) => {
                    tracing::info!(count = prices.len(), "Fetched quotes");
                    return prices;
                }
                Err(e) => {
                    tracing::warn!(attempt, error=%e, "Price fetch failed");
                    if attempt + 1 < MAX_ATTEMPTS {
                        tokio::time::sleep(self.backoff_base * 2u32.pow(attempt)).await;
                    }
                }
            }
        }
        PriceMap::new()
    }

    async fn attempt(&self, joined_ids: &str) -> Result<PriceMap, FetchFailure> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ids", joined_ids),
                ("vs_currencies", self.vs_currency.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchFailure::from_status(status));
        }
        let body: HashMap<String, HashMap<String, Value>> = resp.json().await?;
        Ok(flatten(body, &self.vs_currency))
    }
}

/// Keep only entries whose quote in `currency` is a finite number.
fn flatten(body: HashMap<String, HashMap<String, Value>>, currency: &str) -> PriceMap {
    body.into_iter()
        .filter_map(|(id, quotes)| {
            let quote = quotes.get(currency)?.as_f64()?;
            quote.is_finite().then_some((id, quote))
        })
        .collect()
}
