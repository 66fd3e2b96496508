use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;
use crate::traits::{BlobStore, ObjectInfo, PutOptions, StoredBlob};

/// In-memory, `BTreeMap`-based blob store.
///
/// Intended for tests and embedding. Keys are kept ordered so prefix
/// listings come back in the same lexicographic order an object store gives.
/// Bodies are `Bytes`, so reads are reference-counted rather than copied.
pub struct InMemoryBlobStore {
    objects: RwLock<BTreeMap<String, StoredBlob>>,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, body: Bytes, options: PutOptions) -> StoreResult<()> {
        options.check_length(key, &body)?;
        let blob = StoredBlob {
            body,
            content_type: Some(options.content_type),
        };
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), blob);
        tracing::debug!(key, "memory put");
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoredBlob>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectInfo>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, blob)| ObjectInfo {
                key: key.clone(),
                size: blob.size(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBlobStore")
            .field("object_count", &count)
            .finish()
    }
}
