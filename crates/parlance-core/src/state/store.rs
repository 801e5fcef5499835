//! State store trait.
//!
//! Defines the key-value persistence contract behind the turn state accessor.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract key-value store for per-conversation turn state.
///
/// Values are opaque bytes; the dialog runtime owns their encoding.
///
/// # Implementation Notes
///
/// `set` must be atomic per key: a concurrent `get` of the same key observes
/// either the previous value or the new one, never a partial write.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))`: Value found
    /// - `Ok(None)`: Nothing stored under this key
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removes the value under `key` (no-op if absent).
    async fn delete(&self, key: &str) -> Result<()>;
}
