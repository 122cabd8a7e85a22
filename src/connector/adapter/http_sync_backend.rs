use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::SyncBackend;
use crate::domain::{ApiReply, DomainError, Snapshot, REMOVE_ENDPOINT, STATE_ENDPOINT};

/// Default target: the sync daemon's web interface on its standard port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const BASE_URL_ENV: &str = "CHUNKWATCH_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const API_PREFIX: &str = "/api/";

/// HTTP client for the sync daemon's JSON API.
///
/// Commands are plain `GET` requests on `/api/<command>.json` with arguments in
/// the query string. The timeout bounds how long the refresh loop can stay in
/// its fetching state.
pub struct HttpSyncBackend {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl HttpSyncBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let trimmed = base.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(DomainError::invalid_input(format!(
                "Backend URL must start with http:// or https://, got '{}'",
                base
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
        })
    }

    /// Resolves the base URL from an explicit value, then `CHUNKWATCH_URL`, then
    /// [`DEFAULT_BASE_URL`].
    pub fn resolve_base_url(explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn endpoint_url(&self, command: &str) -> String {
        format!("{}{}{}.json", self.base_url, API_PREFIX, command)
    }

    async fn get(&self, command: &str, query: &[(&str, &str)]) -> Result<String, String> {
        let url = self.endpoint_url(command);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("request to {url} failed: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned {}: {}", url, status, body);
            return Err(format!("backend returned {status}"));
        }

        response
            .text()
            .await
            .map_err(|e| format!("failed to read {command} response: {e}"))
    }
}

#[async_trait]
impl SyncBackend for HttpSyncBackend {
    async fn fetch_state(&self) -> Result<Snapshot, DomainError> {
        let body = self
            .get(STATE_ENDPOINT, &[])
            .await
            .map_err(DomainError::fetch)?;
        Snapshot::decode(&body)
    }

    async fn remove(&self, uuid: &str) -> Result<ApiReply, DomainError> {
        let body = self
            .get(REMOVE_ENDPOINT, &[("uuid", uuid)])
            .await
            .map_err(DomainError::remove)?;

        let reply: ApiReply = serde_json::from_str(&body).map_err(|e| {
            DomainError::remove(format!("failed to decode remove response: {e}"))
        })?;

        reply.accepted()
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
