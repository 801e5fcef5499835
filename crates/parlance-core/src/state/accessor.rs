use super::key::ConversationKey;
use super::store::StateStore;
use crate::dialog::DialogStackSnapshot;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Reads and writes a conversation's dialog stack snapshot through a `StateStore`.
///
/// No caching happens here: every `load` goes to the store, so updates made
/// by another process between turns are always observed.
#[derive(Clone)]
pub struct TurnStateAccessor {
    store: Arc<dyn StateStore>,
}

impl TurnStateAccessor {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Loads the snapshot for `key`.
    ///
    /// A conversation seen for the first time has nothing stored yet; that
    /// yields an empty snapshot rather than an error.
    pub async fn load(&self, key: &ConversationKey) -> Result<DialogStackSnapshot> {
        match self.store.get(key.as_str()).await? {
            Some(bytes) => {
                let snapshot = DialogStackSnapshot::from_bytes(&bytes)?;
                debug!(conversation = %key, depth = snapshot.len(), "loaded dialog stack");
                Ok(snapshot)
            }
            None => {
                debug!(conversation = %key, "no dialog stack stored, starting empty");
                Ok(DialogStackSnapshot::new())
            }
        }
    }

    /// Persists the snapshot for `key` in a single store write.
    pub async fn save(&self, key: &ConversationKey, snapshot: &DialogStackSnapshot) -> Result<()> {
        let bytes = snapshot.to_bytes()?;
        self.store.set(key.as_str(), bytes).await?;
        debug!(conversation = %key, depth = snapshot.len(), "saved dialog stack");
        Ok(())
    }

    /// Drops any stored snapshot for `key`.
    pub async fn delete(&self, key: &ConversationKey) -> Result<()> {
        self.store.delete(key.as_str()).await
    }
}
