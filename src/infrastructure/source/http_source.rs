//! Fetches the country list over HTTP.
//!
//! Transient failures (timeouts and transport errors) are retried with
//! jittered exponential backoff. HTTP error statuses and malformed bodies
//! fail immediately.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::country_record::CountryRecord;
use crate::domain::country_source::CountrySource;
use crate::error::FetchError;

use super::{DEFAULT_SOURCE_URL, parse_records};

pub const DEFAULT_USER_AGENT: &str = concat!("country-registry/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: usize = 2;
const BACKOFF_BASE: u64 = 2;
const BACKOFF_FACTOR_MILLIS: u64 = 100;
const BACKOFF_MAX: Duration = Duration::from_secs(5);

/// Settings for [`HttpCountrySource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub url: String,
    /// Applied to both connecting and the whole request.
    pub timeout: Duration,
    /// Extra attempts after the first one fails transiently.
    pub retries: usize,
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpSourceConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Downloads the country list with a single `GET`.
#[derive(Debug, Clone)]
pub struct HttpCountrySource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpCountrySource {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    async fn fetch_once(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let url = &self.config.url;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.convert_reqwest_error(&e))?
            .error_for_status()
            .map_err(|e| self.convert_reqwest_error(&e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.convert_reqwest_error(&e))?;

        parse_records(&body)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> FetchError {
        let url = self.config.url.clone();

        if error.is_timeout() {
            return FetchError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Status {
                url,
                status: status.as_u16(),
            };
        }

        FetchError::Transport {
            url,
            message: error.to_string(),
        }
    }
}

fn is_transient(error: &FetchError) -> bool {
    let transient = matches!(
        error,
        FetchError::Timeout { .. } | FetchError::Transport { .. }
    );
    if transient {
        tracing::warn!(error = %error, "Fetching country data failed, retrying");
    }
    transient
}

#[async_trait]
impl CountrySource for HttpCountrySource {
    async fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE)
            .factor(BACKOFF_FACTOR_MILLIS)
            .max_delay(BACKOFF_MAX)
            .map(jitter)
            .take(self.config.retries);

        RetryIf::start(strategy, || self.fetch_once(), is_transient).await
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}
