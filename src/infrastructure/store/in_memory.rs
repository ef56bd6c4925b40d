//! # In-Memory Store
//!
//! In-memory implementation of [`KeyValueStore`] for hosts and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{KeyValueStore, StoreResult};

/// In-memory implementation of [`KeyValueStore`].
///
/// Uses a thread-safe `HashMap`. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one pre-populated slot.
    ///
    /// Useful for exercising startup against existing (or corrupt)
    /// persisted data.
    #[must_use]
    pub fn with_slot(slot: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut slots) = store.slots.try_write() {
            slots.insert(slot.into(), value.into());
        }
        store
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn read(&self, slot: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.read().await.get(slot).cloned())
    }

    async fn write(&self, slot: &str, value: &str) -> StoreResult<()> {
        self.slots
            .write()
            .await
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, slot: &str) -> StoreResult<()> {
        self.slots.write().await.remove(slot);
        Ok(())
    }
}
