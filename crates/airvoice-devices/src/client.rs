//! AirGradient HTTP client
//!
//! A single `GET /locations/measures/current?token=...` backs both
//! operations of the directory. Every call is one attempt: failures are
//! returned to the caller, never retried here.

use crate::device::{DeviceList, DeviceRecord};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.airgradient.com/public/api/v1";

/// Current-measures endpoint, relative to the base URL
const MEASURES_PATH: &str = "/locations/measures/current";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of token characters kept visible in logs
const TOKEN_VISIBLE_CHARS: usize = 4;

/// Mask an API token for logging
///
/// Keeps the first few characters so two different tokens can be told apart.
#[must_use]
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "[empty]".to_string();
    }
    let visible: String = token.chars().take(TOKEN_VISIBLE_CHARS).collect();
    format!("{}***", visible)
}

/// Lookup of the devices attached to an API token
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    /// List every device on the account, in API order
    async fn list_devices(&self, token: &str) -> Result<DeviceList>;

    /// Fetch one device by its 1-based position
    ///
    /// Out-of-range positions and rejected tokens both yield
    /// [`Error::NotFound`].
    async fn device_info(&self, token: &str, index: i64) -> Result<DeviceRecord>;
}

/// AirGradient client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AirGradientConfig {
    /// API root (overridable for tests and proxies)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AirGradientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AirGradientConfig {
    /// Set the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the current-measures endpoint
    fn measures_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), MEASURES_PATH)
    }
}

/// HTTP-backed device directory
pub struct AirGradientClient {
    config: AirGradientConfig,
    client: reqwest::Client,
}

impl AirGradientClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(config: AirGradientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "AirGradient client initialized");

        Ok(Self { config, client })
    }

    /// Fetch and decode the current measures of every device on the account
    #[instrument(skip(self, token), fields(token = %mask_token(token)))]
    async fn fetch_current(&self, token: &str) -> Result<Vec<DeviceRecord>> {
        if token.is_empty() {
            return Err(Error::EmptyToken);
        }

        let response = self
            .client
            .get(self.config.measures_url())
            .query(&[("token", token)])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), "AirGradient API rejected request");
            return Err(Error::InvalidToken {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let devices: Vec<DeviceRecord> =
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

        debug!(count = devices.len(), "Fetched AirGradient devices");
        Ok(devices)
    }
}

#[async_trait]
impl DeviceDirectory for AirGradientClient {
    async fn list_devices(&self, token: &str) -> Result<DeviceList> {
        let devices = self.fetch_current(token).await?;
        Ok(DeviceList::from_records(devices))
    }

    async fn device_info(&self, token: &str, index: i64) -> Result<DeviceRecord> {
        let devices = match self.fetch_current(token).await {
            Ok(devices) => devices,
            Err(Error::InvalidToken { status }) => {
                debug!(status, index, "Token rejected while selecting device");
                return Err(Error::NotFound { index });
            }
            Err(e) => return Err(e),
        };

        DeviceList::from_records(devices)
            .get(index)
            .cloned()
            .ok_or(Error::NotFound { index })
    }
}
