use std::sync::Arc;
use tokio::sync::Mutex;

use wallet_crypto::{generate_wallet_key, WalletKey};

use crate::error::StorageError;
use crate::keys::WALLET_KEY;
use crate::kv::KeyValueStore;

/// Owns the single wallet key of this installation.
///
/// The key is generated on first use and never rotated. Creation is
/// serialized so concurrent first calls persist exactly one key.
pub struct SecureKeyStore {
    kv: Arc<dyn KeyValueStore>,
    create_lock: Mutex<()>,
}

impl SecureKeyStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            create_lock: Mutex::new(()),
        }
    }

    /// Return the stored key, creating and persisting it on first call.
    pub async fn get_or_create_key(&self) -> Result<WalletKey, StorageError> {
        if let Some(key) = self.load().await? {
            return Ok(key);
        }

        let _guard = self.create_lock.lock().await;

        // Another caller may have created it while we waited.
        if let Some(key) = self.load().await? {
            return Ok(key);
        }

        let key = generate_wallet_key()?;
        self.kv.set(WALLET_KEY, key.expose()).await?;

        match self.kv.get(WALLET_KEY).await? {
            Some(stored) if stored == key.expose() => {
                tracing::info!(fingerprint = %key.fingerprint(), "wallet key created");
                Ok(key)
            }
            _ => Err(StorageError::Unavailable(
                "wallet key write could not be confirmed".into(),
            )),
        }
    }

    /// Load the stored key without creating one.
    pub async fn load(&self) -> Result<Option<WalletKey>, StorageError> {
        match self.kv.get(WALLET_KEY).await? {
            Some(encoded) => {
                let key = WalletKey::from_encoded(&encoded)?;
                tracing::debug!(fingerprint = %key.fingerprint(), "wallet key loaded");
                Ok(Some(key))
            }
            None => Ok(None),
        }
    }
}
