//! HTTP transport for the wgstatus.com API.
//!
//! One `fetch()` is one GET request: no retry, no caching. The body is
//! decoded as JSON and handed on unmodified.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::StatusError;

/// Public World of Tanks status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.wgstatus.com/api/data/wot";

/// Default request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport for the upstream status endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a new builder for configuring the transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the raw status document.
    ///
    /// This is the only suspension point of a poll. Dropping the returned
    /// future cancels the request.
    pub async fn fetch(&self) -> Result<Value, StatusError> {
        debug!("Fetching status from {}", redact(&self.endpoint));

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::BadStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StatusError::Parse(e.to_string()))
    }
}

/// Builder for HttpTransport.
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    no_proxy: bool,
}

impl HttpTransportBuilder {
    /// Set the status endpoint (default: [`DEFAULT_ENDPOINT`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request deadline (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport, StatusError> {
        let mut client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(self.user_agent.unwrap_or_else(default_user_agent));
        if self.no_proxy {
            client = client.no_proxy();
        }

        Ok(HttpTransport {
            client: client.build()?,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}

fn default_user_agent() -> String {
    format!("wgstatus/{}", env!("CARGO_PKG_VERSION"))
}

// Drop the query string so tokens passed as parameters stay out of logs
fn redact(endpoint: &str) -> &str {
    endpoint.split('?').next().unwrap_or(endpoint)
}
