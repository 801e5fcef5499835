//! File-backed `StateStore` implementation.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! ├── msteams_2fconversations_2fconv-1_2fDialogState.json
//! └── ...
//! ```
//!
//! Each key maps to one file. Writes go through [`AtomicFile`], so a reader
//! of the same key sees either the previous snapshot or the new one.
//!
//! Keys whose escaped form would be too long for a file name are stored as
//! `~{sha256}.json` instead, with the original key in `~{sha256}.key`.

use crate::paths::ParlancePaths;
use crate::storage::{AtomicFile, AtomicFileError};
use async_trait::async_trait;
use parlance_core::error::{DialogError, Result};
use parlance_core::state::StateStore;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENTRY_EXTENSION: &str = "json";
const KEY_EXTENSION: &str = "key";
const HASHED_PREFIX: char = '~';

/// Longest escaped stem stored verbatim. Leaves room for the extension and
/// the temp-file decoration within a 255-byte file name.
const MAX_ENCODED_LEN: usize = 200;

/// A state store keeping one file per key under a base directory.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_dir: PathBuf,
}

impl FileStateStore {
    /// Creates a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            DialogError::storage(format!(
                "Failed to create state directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the platform data directory (`~/.local/share/parlance/state`).
    pub fn default_location() -> Result<Self> {
        let base_dir = ParlancePaths::state_dir()
            .map_err(|e| DialogError::config(format!("Failed to get state directory: {}", e)))?;
        Self::new(base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", file_stem(key), ENTRY_EXTENSION))
    }

    /// Lists the keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let key = if stem.starts_with(HASHED_PREFIX) {
                let key_file = AtomicFile::new(path.with_extension(KEY_EXTENSION));
                key_file
                    .load()
                    .map_err(|e| DialogError::storage(e.to_string()))?
                    .and_then(|bytes| String::from_utf8(bytes).ok())
            } else {
                decode_key(stem)
            };
            if let Some(key) = key {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn entry_files(&self, key: &str) -> EntryFiles {
        let data = AtomicFile::new(self.entry_path(key));
        let key_file = is_hashed(key)
            .then(|| AtomicFile::new(data.path().with_extension(KEY_EXTENSION)));
        EntryFiles {
            data,
            key_file,
            key: key.to_string(),
        }
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> std::result::Result<T, AtomicFileError> + Send + 'static,
    {
        tokio::task::spawn_blocking(operation)
            .await
            .map_err(|e| DialogError::internal(format!("Failed to join task: {}", e)))?
            .map_err(|e| DialogError::storage(e.to_string()))
    }
}

/// The data file of one key, plus the sidecar naming it when the data file
/// name is a hash.
struct EntryFiles {
    data: AtomicFile,
    key_file: Option<AtomicFile>,
    key: String,
}

impl EntryFiles {
    fn save(&self, value: &[u8]) -> std::result::Result<(), AtomicFileError> {
        if let Some(key_file) = &self.key_file {
            key_file.save(self.key.as_bytes())?;
        }
        self.data.save(value)
    }

    fn remove(&self) -> std::result::Result<(), AtomicFileError> {
        self.data.remove()?;
        if let Some(key_file) = &self.key_file {
            key_file.remove()?;
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let file = AtomicFile::new(self.entry_path(key));
        self.run_blocking(move || file.load()).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let files = self.entry_files(key);
        debug!(
            key,
            path = %files.data.path().display(),
            bytes = value.len(),
            "writing state entry"
        );
        self.run_blocking(move || files.save(&value)).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let files = self.entry_files(key);
        self.run_blocking(move || files.remove()).await
    }
}

fn is_hashed(key: &str) -> bool {
    file_stem(key).starts_with(HASHED_PREFIX)
}

/// File stem for `key`: the escaped key, or `~` plus its SHA-256 when the
/// escaped form is longer than `MAX_ENCODED_LEN`.
fn file_stem(key: &str) -> String {
    let encoded = encode_key(key);
    if encoded.len() <= MAX_ENCODED_LEN {
        return encoded;
    }
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{}{:x}", HASHED_PREFIX, hasher.finalize())
}

/// Escapes a key: ASCII alphanumerics and `-` are kept, every
/// other byte becomes `_` plus two hex digits.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("_{:02x}", byte));
        }
    }
    encoded
}

fn decode_key(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' {
            let hex = stem.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
