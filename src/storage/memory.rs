//! In-process session store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;

use super::SessionStore;

/// Keeps session entries in process memory only.
///
/// Nothing survives a restart. Used by tests and by hosts that want
/// sessions to end with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("session store mutex poisoned"))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[tokio::test]
    async fn test_roundtrip_and_overwrite() {
        let store = MemoryStore::new();
        assert!(store.get(keys::ACCESS_TOKEN).await.unwrap().is_none());

        store.set(keys::ACCESS_TOKEN, "T1").await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(),
            Some("T1")
        );

        store.set(keys::ACCESS_TOKEN, "T2").await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(),
            Some("T2")
        );
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        store.remove(keys::USER).await.unwrap();

        store.set(keys::USER, "{}").await.unwrap();
        store.remove(keys::USER).await.unwrap();
        assert!(store.get(keys::USER).await.unwrap().is_none());
    }
}
