//! OS keychain session store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use keyring::Entry;

use super::SessionStore;

/// Service name under which session entries appear in the OS keychain
const SERVICE_NAME: &str = "reelcast";

/// Stores each session entry as its own keychain credential.
///
/// Keychain calls are blocking, so every operation runs on the blocking
/// thread pool. This is the backend production hosts should use; tokens
/// never touch the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainStore;

impl KeychainStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionStore for KeychainStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let entry =
                Entry::new(SERVICE_NAME, &key).context("Failed to create keyring entry")?;
            match entry.get_password() {
                Ok(value) => Ok(Some(value)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(e).context("Failed to read entry from keychain"),
            }
        })
        .await
        .context("Keychain task panicked")?
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || {
            let entry =
                Entry::new(SERVICE_NAME, &key).context("Failed to create keyring entry")?;
            entry
                .set_password(&value)
                .context("Failed to store entry in keychain")
        })
        .await
        .context("Keychain task panicked")?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let entry =
                Entry::new(SERVICE_NAME, &key).context("Failed to create keyring entry")?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(e).context("Failed to delete entry from keychain"),
            }
        })
        .await
        .context("Keychain task panicked")?
    }
}
