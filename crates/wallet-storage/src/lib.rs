//! Wallet Storage — Durable key-value and file storage seams, plus the two
//! write-once resources built on them: the wallet key and ledger genesis
//! artifacts.

pub mod error;
pub mod files;
pub mod genesis;
pub mod keys;
pub mod keystore;
pub mod kv;
pub mod persisted;
pub mod rocks;

pub use error::StorageError;
pub use files::{FileStore, LocalFileStore};
pub use genesis::{parse_genesis, GenesisMarker, GenesisMaterializer};
pub use keystore::SecureKeyStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use persisted::PersistedState;
pub use rocks::RocksStore;
