//! OpenSky REST API HTTP client.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::states::StateSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://opensky-network.org/api";

/// HTTP client for the OpenSky Network API.
#[derive(Debug, Clone)]
pub struct OpenSkyClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Option<(String, String)>,
}

impl OpenSkyClient {
    /// Create a new client. Anonymous unless credentials are added.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Use HTTP basic auth for all requests. Blank usernames are ignored.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        self.credentials = if username.trim().is_empty() {
            None
        } else {
            Some((username, password.into()))
        };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current state vectors, optionally restricted to one ICAO24 address.
    ///
    /// Returns `Ok(None)` when the API answers with a non-success status
    /// (rate limiting, maintenance, outages). Transport and decode failures
    /// are returned as errors.
    pub async fn fetch_states(&self, icao24: Option<&str>) -> Result<Option<StateSnapshot>> {
        let url = format!("{}/states/all", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(icao24) = icao24 {
            request = request.query(&[("icao24", icao24)]);
        }
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch OpenSky states")?;

        if !response.status().is_success() {
            tracing::debug!("OpenSky states request returned {}", response.status());
            return Ok(None);
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to parse OpenSky states response")?;

        StateSnapshot::from_json(&payload).map(Some)
    }
}
