//! Write-once materialization of ledger genesis files.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use wallet_core::{CoreError, GenesisTransaction, LedgerNode};

use crate::error::StorageError;
use crate::files::FileStore;
use crate::keys;
use crate::kv::KeyValueStore;

const GENESIS_DIR: &str = "genesis";

/// Bookkeeping stored next to a materialized artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisMarker {
    pub path: PathBuf,
    pub bytes: usize,
    pub written_at: DateTime<Utc>,
}

/// Turns genesis payloads into local artifacts, at most once per pool
/// namespace, and reads ledger nodes back out of them.
pub struct GenesisMaterializer {
    files: Arc<dyn FileStore>,
    kv: Arc<dyn KeyValueStore>,
    /// Artifact path → single-flight guard for the create-if-absent path.
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl GenesisMaterializer {
    pub fn new(files: Arc<dyn FileStore>, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            files,
            kv,
            locks: DashMap::new(),
        }
    }

    /// Deterministic artifact location, relative to the file store root.
    ///
    /// `[A-Za-z0-9-]` is kept as is; every other byte, `_` included, is
    /// written as `_` plus two hex digits, so distinct namespaces never
    /// share a file.
    pub fn artifact_path(namespace: &str) -> Result<PathBuf, StorageError> {
        if namespace.trim().is_empty() {
            return Err(StorageError::InvalidNamespace(namespace.to_string()));
        }
        let mut file_stem = String::with_capacity(namespace.len());
        for b in namespace.bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' {
                file_stem.push(char::from(b));
            } else {
                file_stem.push('_');
                file_stem.push_str(&hex::encode([b]));
            }
        }
        Ok(Path::new(GENESIS_DIR).join(format!("{}.txn", file_stem)))
    }

    /// Write `payload` as the artifact for `namespace` unless one exists.
    /// Returns the absolute artifact path either way.
    pub async fn ensure_genesis_artifact(
        &self,
        namespace: &str,
        payload: &[u8],
    ) -> Result<PathBuf, StorageError> {
        self.ensure_genesis_artifact_with(namespace, || async move {
            Ok(Bytes::copy_from_slice(payload))
        })
        .await
    }

    /// Like [`ensure_genesis_artifact`](Self::ensure_genesis_artifact), but
    /// the payload is produced by `load`, which only runs when the artifact
    /// is absent.
    pub async fn ensure_genesis_artifact_with<F, Fut>(
        &self,
        namespace: &str,
        load: F,
    ) -> Result<PathBuf, StorageError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Bytes, StorageError>> + Send,
    {
        let relative = Self::artifact_path(namespace)?;
        let absolute = self.files.resolve(&relative);

        if self.files.exists(&relative).await? {
            tracing::debug!(namespace, path = %absolute.display(), "genesis artifact present");
            return Ok(absolute);
        }

        let lock = self.locks.entry(relative.clone()).or_default().clone();
        let _guard = lock.lock().await;

        if self.files.exists(&relative).await? {
            return Ok(absolute);
        }

        let payload = load().await?;
        self.files.write(&relative, &payload).await?;

        let marker = GenesisMarker {
            path: absolute.clone(),
            bytes: payload.len(),
            written_at: Utc::now(),
        };
        if let Err(e) = self.write_marker(namespace, &marker).await {
            tracing::warn!(namespace, error = %e, "failed to record genesis marker");
        }

        tracing::info!(
            namespace,
            path = %absolute.display(),
            bytes = payload.len(),
            "genesis artifact materialized"
        );
        Ok(absolute)
    }

    /// Ledger nodes listed in the artifact for `namespace`.
    ///
    /// A missing artifact, an unreadable artifact, or any malformed line
    /// yields an empty list; a pool is never partially trusted.
    pub async fn parse_nodes(&self, namespace: &str) -> Vec<LedgerNode> {
        let relative = match Self::artifact_path(namespace) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(namespace, error = %e, "cannot locate genesis artifact");
                return Vec::new();
            }
        };

        match self.files.exists(&relative).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(namespace, "no genesis artifact");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(namespace, error = %e, "genesis artifact not accessible");
                return Vec::new();
            }
        }

        let contents = match self.files.read(&relative).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(namespace, error = %e, "failed to read genesis artifact");
                return Vec::new();
            }
        };

        let text = match std::str::from_utf8(&contents) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    namespace,
                    error = %e,
                    "genesis artifact is not UTF-8, ignoring pool"
                );
                return Vec::new();
            }
        };
        match parse_genesis(text) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(namespace, error = %e, "malformed genesis data, ignoring pool");
                Vec::new()
            }
        }
    }

    /// Marker recorded when the artifact was first written, if readable.
    pub async fn marker(&self, namespace: &str) -> Result<Option<GenesisMarker>, StorageError> {
        let Some(raw) = self.kv.get(&keys::genesis_marker(namespace)).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(marker) => Ok(Some(marker)),
            Err(e) => {
                tracing::warn!(namespace, error = %e, "unreadable genesis marker");
                Ok(None)
            }
        }
    }

    async fn write_marker(
        &self,
        namespace: &str,
        marker: &GenesisMarker,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(marker)?;
        self.kv.set(&keys::genesis_marker(namespace), &json).await
    }
}

/// Parse newline-delimited genesis transactions into ledger nodes.
///
/// Blank lines are skipped. The first malformed line fails the whole parse.
pub fn parse_genesis(text: &str) -> Result<Vec<LedgerNode>, CoreError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let txn: GenesisTransaction =
                serde_json::from_str(line).map_err(|e| CoreError::MalformedGenesis {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            txn.node().map_err(|e| CoreError::MalformedGenesis {
                line: idx + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}
