//! Bootstrap state persisted by the UI layer.
//!
//! All blobs are best-effort: a value that fails to parse is logged and
//! replaced by its default. Storage read failures are still errors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use wallet_core::{
    FeatureFlags, LaunchContext, LoginAttempts, MigrationState, OnboardingState, Preferences,
    ToursState,
};

use crate::error::StorageError;
use crate::keys;
use crate::kv::KeyValueStore;

/// Snapshot of every persisted blob the bootstrap reads at app start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    /// `None` when the user has never started onboarding.
    pub onboarding: Option<OnboardingState>,
    pub login_attempts: LoginAttempts,
    pub preferences: Preferences,
    pub migration: MigrationState,
    pub tours: ToursState,
}

impl PersistedState {
    pub async fn load(kv: &dyn KeyValueStore) -> Result<Self, StorageError> {
        let state = Self {
            login_attempts: read_blob(kv, keys::LOGIN_ATTEMPTS).await?.unwrap_or_default(),
            preferences: read_blob(kv, keys::PREFERENCES).await?.unwrap_or_default(),
            migration: read_blob(kv, keys::MIGRATION).await?.unwrap_or_default(),
            tours: read_blob(kv, keys::TOURS).await?.unwrap_or_default(),
            onboarding: read_blob(kv, keys::ONBOARDING).await?,
        };
        tracing::debug!(
            has_onboarding = state.onboarding.is_some(),
            locked_out = state.login_attempts.is_locked_out(),
            "persisted state loaded"
        );
        Ok(state)
    }

    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags::from(&self.preferences)
    }

    pub fn launch_context(&self, authenticated: bool) -> LaunchContext {
        LaunchContext {
            onboarding: self.onboarding.clone(),
            login_attempts: self.login_attempts.clone(),
            flags: self.flags(),
            authenticated,
        }
    }

    pub async fn save_onboarding(
        kv: &dyn KeyValueStore,
        state: &OnboardingState,
    ) -> Result<(), StorageError> {
        write_blob(kv, keys::ONBOARDING, state).await
    }

    pub async fn save_preferences(
        kv: &dyn KeyValueStore,
        prefs: &Preferences,
    ) -> Result<(), StorageError> {
        write_blob(kv, keys::PREFERENCES, prefs).await
    }

    pub async fn save_login_attempts(
        kv: &dyn KeyValueStore,
        attempts: &LoginAttempts,
    ) -> Result<(), StorageError> {
        write_blob(kv, keys::LOGIN_ATTEMPTS, attempts).await
    }
}

/// `Ok(None)` both when the key is absent and when the value is unreadable.
async fn read_blob<T: DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = kv.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable persisted value");
            Ok(None)
        }
    }
}

async fn write_blob<T: Serialize>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    kv.set(key, &json).await
}
