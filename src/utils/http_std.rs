use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::{AggregatorError, Result};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT: u64 = 30;

const USER_AGENT: &str = "clash-aggregator";

/// Something that can turn a source URL into raw YAML text
pub trait SourceFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// Fetches sources over HTTP with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AggregatorError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(HttpFetcher { client })
    }
}

impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        web_get_async(&self.client, url).await
    }
}

/// Makes an HTTP GET request to the specified URL
///
/// # Arguments
/// * `client` - The client to send the request with
/// * `url` - The URL to request
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(AggregatorError)` - Transport failure or a non-success status
pub async fn web_get_async(client: &Client, url: &str) -> Result<String> {
    let fetch_err = |e: reqwest::Error| AggregatorError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let response = client.get(url).send().await.map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AggregatorError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(fetch_err)
}
