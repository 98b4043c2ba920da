use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::contacts::store::ContactStore;

/// In-memory contact store.
/// Keeps the name -> phone map behind a single lock acquired per operation,
/// so concurrent adds to the same name serialize as last-write-wins.
#[derive(Clone, Default)]
pub struct MemoryContactStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryContactStore {
    /// Create an empty store; the state lives for the process lifetime.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Upsert the phone number for a name. Duplicate names overwrite silently.
    pub async fn add(&self, name: String, phone: String) {
        let mut map = self.inner.write().await;
        map.insert(name, phone);
    }

    /// Look up a name; `None` means never added, not an error.
    pub async fn get(&self, name: &str) -> Option<String> {
        let map = self.inner.read().await;
        map.get(name).cloned()
    }

    /// Copy out the full mapping.
    pub async fn all(&self) -> HashMap<String, String> {
        let map = self.inner.read().await;
        map.clone()
    }
}

#[async_trait::async_trait]
impl ContactStore for MemoryContactStore {
    async fn add(&self, name: String, phone: String) { self.add(name, phone).await }
    async fn get(&self, name: &str) -> Option<String> { self.get(name).await }
    async fn all(&self) -> HashMap<String, String> { self.all().await }
}
