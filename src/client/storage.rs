use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("storage write failed: {0}")]
pub struct StorageError(pub String);

/// Browser-local storage boundary. A web front end backs this with real
/// local/session storage; native callers and tests inject [`MemoryStore`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store with session semantics: contents live exactly as long as
/// the store value itself, so a fresh instance models a fresh session.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("value"));

        store.set("key", "updated").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("updated"));
    }
}
