pub mod error;
pub mod keys;

pub use error::CryptoError;
pub use keys::{fingerprint, generate_wallet_key, WalletKey, WALLET_KEY_LEN};
