use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// In-memory, BTreeMap-based object store.
///
/// Intended for tests and embedding. Keys are kept sorted so listings come
/// back in the same lexicographic order a remote store would use.
pub struct InMemoryObjectStore {
    name: String,
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a namespace pre-populated with `(key, data)` pairs.
    pub fn with_objects<I, K, V>(name: impl Into<String>, objects: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let store = Self::new(name);
        {
            let mut map = store.objects.write().expect("lock poisoned");
            for (key, data) in objects {
                map.insert(key.into(), data.into());
            }
        }
        store
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().expect("lock poisoned").contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn head_bucket(&self) -> StoreResult<()> {
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn get_object(&self, key: &str) -> StoreResult<Vec<u8>> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(key)
            .cloned()
            .ok_or_else(|| StoreError::ObjectNotFound(key.to_string()))
    }

    fn put_object(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key must not be empty".into(),
            });
        }
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn delete_objects(&self, keys: &[String]) -> StoreResult<Vec<String>> {
        let mut map = self.objects.write().expect("lock poisoned");
        Ok(keys
            .iter()
            .filter(|key| map.remove(key.as_str()).is_some())
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("name", &self.name)
            .field("object_count", &self.len())
            .finish()
    }
}
