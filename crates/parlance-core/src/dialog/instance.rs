//! Dialog activation records and the persisted stack snapshot.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One activation of a dialog on the stack.
///
/// `state` is an opaque payload owned by the dialog implementation. The
/// runtime never interprets it; it is only carried across turns byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogInstance {
    /// Id of the dialog definition in the catalog.
    pub id: String,
    /// Per-activation state, base64-encoded on the wire.
    #[serde(default, with = "opaque_state")]
    pub state: Vec<u8>,
}

impl DialogInstance {
    /// Creates an activation with empty state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Vec::new(),
        }
    }

    /// Decodes the activation state as JSON.
    ///
    /// Returns `Ok(None)` while no state has been written.
    pub fn state_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.state.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&self.state)?))
    }

    /// Replaces the activation state with the JSON encoding of `value`.
    pub fn set_state<T: Serialize>(&mut self, value: &T) -> Result<()> {
        self.state = serde_json::to_vec(value)?;
        Ok(())
    }
}

/// The persisted form of a conversation's dialog stack.
///
/// `dialog_stack[0]` is the top of the stack (the active dialog).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogStackSnapshot {
    #[serde(default)]
    pub dialog_stack: Vec<DialogInstance>,
}

impl DialogStackSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.dialog_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialog_stack.is_empty()
    }

    /// Encodes the snapshot for a `StateStore`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a snapshot previously produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

mod opaque_state {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_roundtrip_through_helpers() {
        let mut instance = DialogInstance::new("booking");
        assert_eq!(instance.state_as::<serde_json::Value>().unwrap(), None);

        instance.set_state(&json!({ "step": 2 })).unwrap();
        let state: serde_json::Value = instance.state_as().unwrap().unwrap();
        assert_eq!(state["step"], 2);
    }

    #[test]
    fn test_snapshot_preserves_order_and_raw_bytes() {
        let snapshot = DialogStackSnapshot {
            dialog_stack: vec![
                DialogInstance {
                    id: "child".to_string(),
                    state: vec![0x00, 0xff, 0x10, b'\n'],
                },
                DialogInstance::new("root"),
            ],
        };

        let restored = DialogStackSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.dialog_stack[0].id, "child");
        assert_eq!(restored.dialog_stack[0].state, vec![0x00, 0xff, 0x10, b'\n']);
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = DialogStackSnapshot {
            dialog_stack: vec![DialogInstance {
                id: "greet".to_string(),
                state: b"hi".to_vec(),
            }],
        };
        let value: serde_json::Value = serde_json::from_slice(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(value, json!({ "dialogStack": [{ "id": "greet", "state": "aGk=" }] }));
    }

    #[test]
    fn test_corrupt_snapshot_is_serialization_error() {
        let err = DialogStackSnapshot::from_bytes(b"{\"dialogStack\": [{\"id\": \"x\", \"state\": \"!!\"}]}")
            .unwrap_err();
        assert!(err.is_serialization());
    }
}
