// ABOUTME: In-memory key-value store
// ABOUTME: Used for tests and for embedding without a database file

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{validate_key, KeyValueStore, StorageResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted list of the keys currently held
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &Value) -> StorageResult<()> {
        validate_key(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn del(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_del() {
        let store = MemoryStore::new();
        assert!(store.get("settings").await.unwrap().is_none());

        store
            .put("settings", &json!({"display": {"theme": "dark"}}))
            .await
            .unwrap();
        assert_eq!(
            store.get("settings").await.unwrap(),
            Some(json!({"display": {"theme": "dark"}}))
        );

        store.del("settings").await.unwrap();
        assert!(store.get("settings").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_del_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.del("db-version-latest-SEPTA").await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let store = MemoryStore::new();
        let result = store.put("", &json!(1)).await;
        assert!(matches!(result, Err(StorageError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_keys_sorted() {
        let store = MemoryStore::new();
        store.put("b", &json!(2)).await.unwrap();
        store.put("a", &json!(1)).await.unwrap();
        assert_eq!(store.keys().await, vec!["a".to_string(), "b".to_string()]);
    }
}
