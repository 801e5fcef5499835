use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a dialog operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "camelCase")]
pub enum DialogTurnResult {
    /// No dialog was active to handle the turn.
    Empty,
    /// The active dialog is waiting for the next input.
    Waiting,
    /// The dialog finished, optionally returning a value to its parent.
    Complete(Option<Value>),
    /// The dialog stack was cancelled.
    Cancelled,
}

impl DialogTurnResult {
    /// Shorthand for a completion carrying `value`.
    pub fn complete(value: impl Into<Value>) -> Self {
        Self::Complete(Some(value.into()))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The value carried by a completion, if any.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Complete(value) => value.as_ref(),
            _ => None,
        }
    }
}

/// Why a parent dialog is being resumed.
///
/// The reason names the operation during which the child completed:
///
/// | child completed in            | parent resumed with |
/// |-------------------------------|---------------------|
/// | its `begin`                   | `BeginCalled`       |
/// | its `continue_dialog`         | `ContinueCalled`    |
/// | a `replace_dialog` begin      | `ReplaceCalled`     |
/// | an explicit `end_dialog` call | `EndCalled`         |
///
/// When a resumed parent completes as well, its own parent receives the
/// same reason. Cancelling never resumes a dialog and has no reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogReason {
    /// A child completed during `begin`.
    BeginCalled,
    /// A child completed during `continue_dialog`.
    ContinueCalled,
    /// A child was ended by `end_dialog`.
    EndCalled,
    /// A child began by `replace_dialog` completed immediately.
    ReplaceCalled,
}
