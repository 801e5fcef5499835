use crate::error::{DialogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key addressing one conversation's dialog state.
///
/// Rendered as `{channel_id}/conversations/{conversation_id}/{property}`, so
/// keys never collide across channels or across state properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationKey(String);

impl ConversationKey {
    pub fn new(channel_id: &str, conversation_id: &str, property: &str) -> Result<Self> {
        if channel_id.is_empty() {
            return Err(DialogError::invalid_argument(
                "ConversationKey: channel_id cannot be empty",
            ));
        }
        if conversation_id.is_empty() {
            return Err(DialogError::invalid_argument(
                "ConversationKey: conversation_id cannot be empty",
            ));
        }
        if property.is_empty() {
            return Err(DialogError::invalid_argument(
                "ConversationKey: property cannot be empty",
            ));
        }
        Ok(Self(format!(
            "{}/conversations/{}/{}",
            channel_id, conversation_id, property
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = ConversationKey::new("msteams", "conv-1", "DialogState").unwrap();
        assert_eq!(key.as_str(), "msteams/conversations/conv-1/DialogState");
    }

    #[test]
    fn test_empty_parts_rejected() {
        assert!(ConversationKey::new("", "conv-1", "DialogState")
            .unwrap_err()
            .is_invalid_argument());
        assert!(ConversationKey::new("msteams", "", "DialogState")
            .unwrap_err()
            .is_invalid_argument());
        assert!(ConversationKey::new("msteams", "conv-1", "")
            .unwrap_err()
            .is_invalid_argument());
    }
}
