//! HTTP client wrapper.
//!
//! Provides a wrapper around reqwest with a configured timeout, a fixed
//! user agent and bearer authentication. Responses are fully buffered.

use crate::config::NetworkConfig;
use crate::{RaceCacheError, Result};
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

impl TextResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client with a default timeout.
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_timeout(NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a new HTTP client with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| RaceCacheError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// GET `url` with a bearer token and buffer the whole body.
    ///
    /// Non-success statuses are returned, not turned into errors; only
    /// transport failures are errors.
    pub async fn get_with_bearer(&self, url: &str, token: &str) -> Result<TextResponse> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(TextResponse { status, body })
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> RaceCacheError {
        if err.is_timeout() {
            RaceCacheError::Timeout(self.default_timeout)
        } else {
            RaceCacheError::Network {
                message: format!("GET {} failed: {}", url, err),
                source: Some(err),
            }
        }
    }
}
