pub mod list;
pub mod reset;
pub mod show;

use anyhow::{Context, Result};
use parlance_core::config::DialogConfig;
use parlance_core::state::{ConversationKey, TurnStateAccessor};
use parlance_infrastructure::{FileStateStore, RuntimeConfig, StorageConfig};
use std::path::Path;
use std::sync::Arc;

/// The file store and dialog settings every command works against.
pub struct StoreContext {
    pub store: Arc<FileStateStore>,
    pub dialogs: DialogConfig,
}

impl StoreContext {
    /// Resolves the store: `--state-dir`, then the configured file store,
    /// then the platform default.
    pub fn open(config_path: Option<&Path>, state_dir: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => RuntimeConfig::load(path),
            None => RuntimeConfig::load_default(),
        }
        .context("Failed to load runtime config")?;

        let store = match (state_dir, &config.storage) {
            (Some(dir), _) => FileStateStore::new(dir),
            (None, StorageConfig::File { dir: Some(dir) }) => FileStateStore::new(dir),
            (None, _) => FileStateStore::default_location(),
        }
        .context("Failed to open state store")?;

        tracing::debug!(dir = %store.base_dir().display(), "using state store");
        Ok(Self {
            store: Arc::new(store),
            dialogs: config.dialogs,
        })
    }

    pub fn accessor(&self) -> TurnStateAccessor {
        TurnStateAccessor::new(self.store.clone())
    }

    pub fn key(&self, channel: &str, conversation: &str) -> Result<ConversationKey> {
        Ok(ConversationKey::new(
            channel,
            conversation,
            &self.dialogs.state_property,
        )?)
    }
}
