//! HTTP client for downloading bi5 files.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use dukabars_types::DukabarsError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::url::{BASE_URL, candle_url_with_base};

/// Configuration for the download client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Feed root the per-day paths are appended to.
    pub base_url: String,
    /// User agent string.
    pub user_agent: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: format!("dukabars/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}

/// Errors that can occur during downloads.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status other than success or 404.
    #[error("Unexpected status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

impl From<FetchError> for DukabarsError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => Self::Http(e.to_string()),
            FetchError::Status { status, url } => Self::Status { status, url },
        }
    }
}

/// Source of per-day compressed candle files.
#[async_trait]
pub trait DayFetcher: Send + Sync {
    /// Fetches the compressed file for `symbol` on `day`.
    ///
    /// Returns `Ok(None)` if the provider has no file for that day.
    async fn fetch_day(&self, symbol: &str, day: NaiveDate) -> Result<Option<Bytes>, FetchError>;
}

/// HTTP client issuing one plain GET per day.
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: Client,
    config: ClientConfig,
}

impl DownloadClient {
    /// Creates a new download client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the candle URL for `symbol` on `day` under the configured root.
    #[must_use]
    pub fn url(&self, symbol: &str, day: NaiveDate) -> String {
        candle_url_with_base(&self.config.base_url, symbol, day)
    }

    /// Downloads a single bi5 file, returning the compressed bytes.
    ///
    /// Returns `Ok(None)` if the file does not exist (404).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any other non-success status.
    pub async fn download(&self, url: &str) -> Result<Option<Bytes>, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(url, "download failed, no data for this day");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.bytes().await?))
    }
}

#[async_trait]
impl DayFetcher for DownloadClient {
    async fn fetch_day(&self, symbol: &str, day: NaiveDate) -> Result<Option<Bytes>, FetchError> {
        self.download(&self.url(symbol, day)).await
    }
}
