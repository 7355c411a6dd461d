use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::MarketplaceConfig;
use crate::constants::retry::RETRYABLE_STATUSES;
use crate::error::ScrapeError;

/// HTTP client for the marketplace search endpoint.
///
/// The retry policy lives here, configured at construction time; there is
/// no process-wide shared session.
#[derive(Clone)]
pub struct AmazonClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl AmazonClient {
    /// Builds a client with the configured timeout and browser-like headers.
    pub fn new(config: &MarketplaceConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Self::with_shared_client(client, config)
    }

    /// Wraps an externally constructed `reqwest::Client`, the preferred
    /// path when one client is shared across services.
    pub fn with_shared_client(client: Client, config: &MarketplaceConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid marketplace base URL: {e}"))?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the search URL for a 1-based page number. Page 1 carries no
    /// page parameter.
    #[must_use]
    pub fn search_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/s");
        url.query_pairs_mut().append_pair("k", query);
        if page >= 2 {
            url.query_pairs_mut()
                .append_pair("page", &page.to_string());
        }
        url
    }

    /// Fetches one results page, retrying transient upstream errors
    /// (500/502/503/504) with exponential backoff.
    pub async fn fetch_page(&self, query: &str, page: u32) -> Result<String, ScrapeError> {
        let url = self.search_url(query, page);
        debug!("Fetching page {page} for query '{query}': {url}");

        let mut delay = self.retry_base_delay;
        let mut attempt = 0u32;

        loop {
            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        info!("Fetched page {page} for query '{query}' (status {status})");
                        return response
                            .text()
                            .await
                            .map_err(|e| ScrapeError::Request(e.to_string()));
                    }

                    if is_retryable(status.as_u16()) && attempt < self.max_retries {
                        attempt += 1;
                        warn!(
                            "HTTP {status} for query '{query}' page {page}, retry {attempt}/{} in {delay:?}",
                            self.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                        continue;
                    }

                    return Err(ScrapeError::Http {
                        status: status.as_u16(),
                    });
                }
                Err(e) if e.is_timeout() => {
                    return Err(ScrapeError::Timeout(query.to_string()));
                }
                Err(e) if e.is_connect() => {
                    return Err(ScrapeError::Connection(e.to_string()));
                }
                Err(e) => {
                    return Err(ScrapeError::Request(e.to_string()));
                }
            }
        }
    }
}

fn is_retryable(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketplaceConfig;

    fn client() -> AmazonClient {
        AmazonClient::new(&MarketplaceConfig::default()).unwrap()
    }

    #[test]
    fn search_url_first_page_has_no_page_param() {
        let url = client().search_url("usb microphone", 1);
        assert_eq!(url.as_str(), "https://www.amazon.com/s?k=usb+microphone");
    }

    #[test]
    fn search_url_later_pages_carry_page_param() {
        let url = client().search_url("headphones", 3);
        assert_eq!(url.as_str(), "https://www.amazon.com/s?k=headphones&page=3");
    }

    #[test]
    fn retryable_statuses_match_policy() {
        for status in [500, 502, 503, 504] {
            assert!(is_retryable(status), "{status} should be retryable");
        }
        for status in [404, 403, 429, 501] {
            assert!(!is_retryable(status), "{status} should not be retryable");
        }
    }
}
