use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Per-conversation turn locks.
///
/// Two turns of the same conversation must not interleave their
/// load/dispatch/save cycles, or the later save would silently drop the
/// earlier turn's stack changes. Turns of different conversations never
/// contend. Callers hand their lock back through [`release`](Self::release)
/// so the map only holds conversations with a turn in flight.
pub struct ConversationLocks {
    locks: Arc<RwLock<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the lock for `key`, creating it on first use.
    pub async fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(key) {
            return lock.clone();
        }
        let mut locks = self.locks.write().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Returns a handle obtained from [`lock_for`](Self::lock_for) and forgets
    /// the key if no other turn holds or awaits its lock.
    pub async fn release(&self, key: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        let mut locks = self.locks.write().await;
        if locks
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(key);
        }
    }

    /// Drops locks nobody is holding or waiting on.
    pub async fn prune(&self) -> usize {
        let mut locks = self.locks.write().await;
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locks.read().await.is_empty()
    }
}

impl Default for ConversationLocks {
    fn default() -> Self {
        Self::new()
    }
}
