use bytes::Bytes;
use std::time::Duration;

use crate::error::NetworkError;

/// Fetches genesis files for pools configured with a URL.
#[derive(Debug, Clone, Default)]
pub struct GenesisDownloader {
    http: reqwest::Client,
}

impl GenesisDownloader {
    pub fn with_timeout(timeout: Duration) -> Result<Self, NetworkError> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<Bytes, NetworkError> {
        fetch_genesis(&self.http, url).await
    }
}

/// Download a genesis file for a pool that is not bundled with the app.
pub async fn fetch_genesis(http: &reqwest::Client, url: &str) -> Result<Bytes, NetworkError> {
    reqwest::Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", url, e)))?;

    let resp = http.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(NetworkError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.bytes().await?;
    tracing::info!(%url, bytes = body.len(), "genesis file downloaded");
    Ok(body)
}
