//! RocksDB backend for the key-value store.

use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Options, DB};
use std::path::Path;
use std::sync::Arc;

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Column family holding every namespaced bootstrap key.
const CF_STATE: &str = "state";

/// RocksDB-backed durable key-value store.
///
/// Reads and writes run on the blocking thread pool.
pub struct RocksStore {
    db: Arc<DB>,
}

impl RocksStore {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![ColumnFamilyDescriptor::new(CF_STATE, Options::default())];
        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)?;

        tracing::debug!(path = %path.display(), "key-value store opened");
        Ok(Self { db: Arc::new(db) })
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&DB) -> Result<T, StorageError> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| StorageError::Unavailable(format!("storage task failed: {}", e)))?
    }
}

fn state_cf(db: &DB) -> Result<&ColumnFamily, StorageError> {
    db.cf_handle(CF_STATE).ok_or_else(|| {
        StorageError::Unavailable(format!("column family '{}' not found", CF_STATE))
    })
}

#[async_trait]
impl KeyValueStore for RocksStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let name = key.to_string();
        self.run_blocking(move |db| {
            let Some(bytes) = db.get_cf(state_cf(db)?, name.as_bytes())? else {
                return Ok(None);
            };
            String::from_utf8(bytes).map(Some).map_err(|e| {
                StorageError::Unavailable(format!("non UTF-8 value at '{}': {}", name, e))
            })
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (key, value) = (key.to_string(), value.to_string());
        self.run_blocking(move |db| {
            db.put_cf(state_cf(db)?, key.as_bytes(), value.as_bytes())?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = key.to_string();
        self.run_blocking(move |db| {
            db.delete_cf(state_cf(db)?, key.as_bytes())?;
            Ok(())
        })
        .await
    }
}
