//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! [dialogs]
//! max_stack_depth = 32
//!
//! [storage]
//! kind = "file"
//! dir = "/var/lib/parlance/state"
//!
//! [connector]
//! service_url = "https://smba.trafficmanager.net/amer/"
//! timeout_secs = 15
//! ```

use crate::connector_client::{ConnectorClient, DEFAULT_TIMEOUT_SECS};
use crate::file_state_store::FileStateStore;
use crate::memory_state_store::InMemoryStateStore;
use crate::paths::ParlancePaths;
use parlance_core::channel::ChannelOperations;
use parlance_core::config::DialogConfig;
use parlance_core::error::{DialogError, Result};
use parlance_core::state::StateStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Top-level runtime configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub dialogs: DialogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<ConnectorConfig>,
}

/// Where dialog stacks are persisted.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process memory; state is lost on restart.
    #[default]
    Memory,
    /// One file per conversation. `dir` defaults to the platform data directory.
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dir: Option<PathBuf>,
    },
}

/// Connector service endpoint used for channel operations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConnectorConfig {
    pub service_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RuntimeConfig {
    /// Loads configuration from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loaded runtime config");
                Ok(toml::from_str(&content)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "runtime config not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(DialogError::config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Loads `~/.config/parlance/config.toml`.
    pub fn load_default() -> Result<Self> {
        let path = ParlancePaths::config_file()
            .map_err(|e| DialogError::config(format!("Failed to get config path: {}", e)))?;
        Self::load(path)
    }

    /// Builds the configured state store.
    pub fn build_state_store(&self) -> Result<Arc<dyn StateStore>> {
        match &self.storage {
            StorageConfig::Memory => Ok(Arc::new(InMemoryStateStore::new())),
            StorageConfig::File { dir: Some(dir) } => Ok(Arc::new(FileStateStore::new(dir)?)),
            StorageConfig::File { dir: None } => Ok(Arc::new(FileStateStore::default_location()?)),
        }
    }

    /// Builds the connector client, if one is configured.
    pub fn build_channel(&self) -> Result<Option<Arc<dyn ChannelOperations>>> {
        let Some(connector) = &self.connector else {
            return Ok(None);
        };
        let client = ConnectorClient::with_options(
            connector.service_url.clone(),
            connector.bearer_token.clone(),
            Duration::from_secs(connector.timeout_secs),
        )?;
        Ok(Some(Arc::new(client)))
    }
}
