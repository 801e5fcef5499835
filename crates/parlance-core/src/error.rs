//! Error types for the dialog runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the dialog runtime.
///
/// Every failure a turn can hit is one of these variants. None of them is
/// retried internally; a failed operation aborts the current turn and leaves
/// the previously persisted dialog stack untouched.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DialogError {
    /// A required input was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A dialog with the same id is already registered.
    #[error("A dialog with an id of '{id}' is already registered")]
    DuplicateDialogId { id: String },

    /// The requested dialog id is not registered in the catalog.
    #[error("Dialog not found: '{id}'")]
    DialogNotFound { id: String },

    /// A push would exceed the configured maximum stack depth.
    #[error("Dialog stack depth limit of {limit} exceeded")]
    StackDepthExceeded { limit: usize },

    /// The channel connector failed (transport, auth, or missing client).
    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", "base64"
        message: String,
    },

    /// State store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DialogError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a DuplicateDialogId error
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateDialogId { id: id.into() }
    }

    /// Creates a DialogNotFound error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::DialogNotFound { id: id.into() }
    }

    /// Creates a ChannelUnavailable error
    pub fn channel_unavailable(message: impl Into<String>) -> Self {
        Self::ChannelUnavailable(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a DialogNotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DialogNotFound { .. })
    }

    /// Check if this is a DuplicateDialogId error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateDialogId { .. })
    }

    /// Check if this is an InvalidArgument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a StackDepthExceeded error
    pub fn is_stack_depth_exceeded(&self) -> bool {
        matches!(self, Self::StackDepthExceeded { .. })
    }

    /// Check if this is a ChannelUnavailable error
    pub fn is_channel_unavailable(&self) -> bool {
        matches!(self, Self::ChannelUnavailable(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DialogError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for DialogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DialogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for DialogError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, for dialogs built on anyhow-based helpers.
impl From<anyhow::Error> for DialogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, DialogError>`.
pub type Result<T> = std::result::Result<T, DialogError>;
