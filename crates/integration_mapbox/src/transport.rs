//! HTTP transport seam
//!
//! [`MapboxClient`](crate::MapboxClient) never talks to `reqwest` directly.
//! It hands fully built URLs to an [`HttpTransport`], so tests can swap in a
//! mock and inspect exactly what would go over the wire.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use tracing::debug;
use url::Url;

use crate::config::MapboxConfig;
use crate::error::MapboxError;

/// A raw HTTP response, before status mapping and JSON decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Value of the `Retry-After` header in seconds, if present
    pub retry_after_secs: Option<u64>,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Build a response with the given status and body
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after_secs: None,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Issues HTTP requests on behalf of the client
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET request
    async fn get(&self, url: Url) -> Result<HttpResponse, MapboxError>;

    /// Perform a POST request with a JSON body
    async fn post_json(&self, url: Url, body: String) -> Result<HttpResponse, MapboxError>;
}

/// `reqwest`-backed transport
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestTransport {
    /// Create a new transport from the client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &MapboxConfig) -> Result<Self, MapboxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| MapboxError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Map a send or body-read failure
    ///
    /// The client timeout also covers reading the body, so both paths can time out.
    fn map_transport_error(&self, e: reqwest::Error) -> MapboxError {
        if e.is_timeout() {
            MapboxError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            // reqwest includes the URL in its message; strip it so the token never leaks
            MapboxError::ConnectionFailed(e.without_url().to_string())
        }
    }

    async fn read_response(&self, response: reqwest::Response) -> Result<HttpResponse, MapboxError> {
        let status = response.status().as_u16();
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        debug!(status, bytes = body.len(), "Received Mapbox response");

        Ok(HttpResponse {
            status,
            retry_after_secs,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, MapboxError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.read_response(response).await
    }

    async fn post_json(&self, url: Url, body: String) -> Result<HttpResponse, MapboxError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.read_response(response).await
    }
}
