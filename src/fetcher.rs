/*!
 * Page fetching for caption extraction.
 *
 * The extraction pipeline talks to the network through the `PageFetcher`
 * trait so that tests can substitute an in-memory implementation. The
 * production implementation wraps a reqwest client built per extraction
 * call with the configured User-Agent, optional Accept-Language header
 * and timeout.
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;

use crate::app_config::ExtractionConfig;
use crate::errors::FetchError;

/// Common trait for page fetchers
///
/// Both outbound reads of an extraction (watch page, caption body) go
/// through the same fetcher, so the header policy is applied uniformly.
#[async_trait]
pub trait PageFetcher: Send + Sync + Debug {
    /// Fetch a URL and return the response body as text
    ///
    /// # Arguments
    /// * `url` - Absolute URL to fetch
    ///
    /// # Returns
    /// * `Result<String, FetchError>` - The body, or a transport/status error
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher
///
/// Owns its client; dropping the fetcher at the end of an extraction
/// releases the connection pool with it.
#[derive(Debug)]
pub struct HttpFetcher {
    /// HTTP client carrying the default headers for this extraction
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher for one extraction call
    pub fn new(config: &ExtractionConfig, accept_language: Option<&str>) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(lang) = accept_language {
            match HeaderValue::from_str(lang) {
                Ok(value) => {
                    headers.insert(ACCEPT_LANGUAGE, value);
                }
                Err(_) => {
                    debug!("Skipping unencodable Accept-Language value: {}", lang);
                }
            }
        }

        Self {
            client: Client::builder()
                .user_agent(config.user_agent.as_str())
                .default_headers(headers)
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))
    }
}
