//! Infrastructure for the parlance dialog runtime: state stores, the
//! connector client, runtime configuration and platform paths.

pub mod config;
pub mod connector_client;
pub mod file_state_store;
pub mod memory_state_store;
pub mod paths;
pub mod storage;

pub use crate::config::{ConnectorConfig, RuntimeConfig, StorageConfig};
pub use crate::connector_client::ConnectorClient;
pub use crate::file_state_store::FileStateStore;
pub use crate::memory_state_store::InMemoryStateStore;
