use std::collections::HashMap;
use async_trait::async_trait;
use cms_core::{PreferenceChange, PreferenceStore, Result};
use tokio::sync::{broadcast, RwLock};
use crate::CHANGE_CHANNEL_CAPACITY;

/// Preferences that live as long as the process.
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
    changes: broadcast::Sender<PreferenceChange>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: RwLock::new(HashMap::new()),
            changes,
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value.to_string());
        // No subscribers is fine
        let _ = self.changes.send(PreferenceChange {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get("theme").await.unwrap(), None);

        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));

        store.set("theme", "light").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_subscribe_receives_changes() {
        let store = MemoryPreferenceStore::new();
        let mut changes = store.subscribe();

        store.set("theme", "dark").await.unwrap();
        let change = changes.recv().await.unwrap();
        assert_eq!(change, PreferenceChange { key: "theme".to_string(), value: "dark".to_string() });
    }
}
