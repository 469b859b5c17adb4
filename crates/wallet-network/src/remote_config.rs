//! Remote configuration lookup.
//!
//! The endpoint serves `GET /urls` as a list of `{ "id", "value" }` entries
//! and `GET /urls/{id}` as a single entry.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::NetworkError;

/// Entry holding the mediator invitation URL.
pub const MEDIATOR_URL: &str = "MEDIATOR_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub id: String,
    pub value: String,
}

/// Named configuration values fetched at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    values: HashMap<String, String>,
}

impl RemoteConfig {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// Mediator invitation URL, ignoring blank values.
    pub fn mediator_url(&self) -> Option<&str> {
        self.get(MEDIATOR_URL).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries sorted by id.
    pub fn entries(&self) -> Vec<ConfigEntry> {
        let mut entries: Vec<ConfigEntry> = self
            .values
            .iter()
            .map(|(id, value)| ConfigEntry {
                id: id.clone(),
                value: value.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }
}

/// Later entries with the same id replace earlier ones.
impl FromIterator<ConfigEntry> for RemoteConfig {
    fn from_iter<I: IntoIterator<Item = ConfigEntry>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|e| (e.id, e.value)).collect(),
        }
    }
}

/// Anything that can supply remote configuration.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<RemoteConfig, NetworkError>;
}

/// HTTP client for the configuration endpoint.
#[derive(Debug, Clone)]
pub struct RemoteConfigClient {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteConfigClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NetworkError> {
        reqwest::Url::parse(base_url)
            .map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every configuration entry.
    pub async fn fetch_all(&self) -> Result<Vec<ConfigEntry>, NetworkError> {
        self.get_json(&format!("{}/urls", self.base_url)).await
    }

    /// A single entry by id.
    pub async fn fetch_entry(&self, id: &str) -> Result<ConfigEntry, NetworkError> {
        match self
            .get_json(&format!("{}/urls/{}", self.base_url, id))
            .await
        {
            Err(NetworkError::Status { status: 404, .. }) => {
                Err(NetworkError::EntryNotFound(id.to_string()))
            }
            other => other,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NetworkError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ConfigSource for RemoteConfigClient {
    async fn fetch(&self) -> Result<RemoteConfig, NetworkError> {
        let entries = self.fetch_all().await?;
        tracing::debug!(
            count = entries.len(),
            url = %self.base_url,
            "remote configuration fetched"
        );
        Ok(entries.into_iter().collect())
    }
}
