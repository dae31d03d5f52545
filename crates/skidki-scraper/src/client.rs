//! HTTP fetcher for merchant discount pages.

use reqwest::Client;

use crate::error::ScraperError;

/// Issues plain GET requests against merchant URLs.
///
/// One request per call: no retries, no caching, and no timeout or header
/// overrides beyond the `reqwest` defaults.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with default `reqwest` settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., TLS backend initialisation failure).
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Fetches the raw markup of a merchant page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] if the server answered with a non-2xx status.
    /// - [`ScraperError::Http`] on connection, TLS or body-read failure.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "fetching merchant page");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "merchant page returned error status");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "merchant page fetched");
        Ok(body)
    }
}
