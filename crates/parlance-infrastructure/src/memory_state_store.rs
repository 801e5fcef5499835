//! In-memory `StateStore` implementation.

use async_trait::async_trait;
use parlance_core::error::Result;
use parlance_core::state::StateStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A process-local state store.
///
/// Useful for tests and single-process bots that can afford to lose dialog
/// state on restart. Each `set` replaces the whole value under the write
/// lock, so readers never observe a partial write.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
