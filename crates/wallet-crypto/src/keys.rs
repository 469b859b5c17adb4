use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Raw key length in bytes.
pub const WALLET_KEY_LEN: usize = 32;

/// Symmetric wallet key, base58-encoded as the identity agent expects it.
///
/// The encoded form is wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct WalletKey(String);

impl WalletKey {
    /// Wrap a stored key, checking it decodes to the expected length.
    pub fn from_encoded(encoded: &str) -> Result<Self, CryptoError> {
        let mut raw = bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?;
        let len = raw.len();
        raw.zeroize();
        if len != WALLET_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: WALLET_KEY_LEN,
                actual: len,
            });
        }
        Ok(Self(encoded.trim().to_string()))
    }

    /// The encoded key, for handing to storage or the agent.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short non-reversible identifier safe to log.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.0.as_bytes())
    }
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletKey({})", self.fingerprint())
    }
}

/// Generate a fresh wallet key from the OS CSPRNG.
pub fn generate_wallet_key() -> Result<WalletKey, CryptoError> {
    let mut raw = [0u8; WALLET_KEY_LEN];
    OsRng
        .try_fill_bytes(&mut raw)
        .map_err(|e| CryptoError::KeyGenerationError(e.to_string()))?;
    let encoded = bs58::encode(&raw).into_string();
    raw.zeroize();
    let key = WalletKey(encoded);
    tracing::debug!(fingerprint = %key.fingerprint(), "wallet key generated");
    Ok(key)
}

/// First 8 bytes of the BLAKE3 digest, hex-encoded.
pub fn fingerprint(data: &[u8]) -> String {
    let digest = blake3::hash(data);
    hex::encode(&digest.as_bytes()[..8])
}
