//! Persistent key-value storage for session artifacts.
//!
//! The session manager persists exactly three string-keyed entries: the
//! access token, the refresh token, and a serialized copy of the
//! last-known identity record. Backends provided:
//!
//! - `FileStore`: single JSON file, for development and desktop hosts
//! - `KeychainStore`: OS keychain entries, for production hosts
//! - `MemoryStore`: in-process map, for tests and ephemeral sessions

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;

/// Keys for the persisted session entries.
pub mod keys {
    /// Access token attached to authenticated requests.
    pub const ACCESS_TOKEN: &str = "token";

    /// Refresh token used to mint a new token pair.
    pub const REFRESH_TOKEN: &str = "refresh_token";

    /// Serialized copy of the last-known identity record.
    pub const USER: &str = "user";
}

/// Async key-value store holding the persisted session entries.
///
/// Values survive process restarts (`MemoryStore` excepted). Writer
/// coordination is the session manager's operation lock; stores do not
/// need their own.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value. `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write or overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
