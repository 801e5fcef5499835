//! Dialog trait.
//!
//! Defines the capability every registered dialog provides.

use super::context::DialogContext;
use super::turn_result::{DialogReason, DialogTurnResult};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A unit of multi-turn conversational logic.
///
/// Dialogs are registered once in a [`DialogCatalog`](super::DialogCatalog)
/// and are shared, immutable definitions. Everything that varies per
/// activation lives in the instance on top of the stack, reachable through
/// [`DialogContext::active_dialog_mut`].
///
/// A dialog signals that it is finished by returning
/// [`DialogTurnResult::Complete`]; the context then pops its instance and
/// resumes the parent.
#[async_trait]
pub trait Dialog: Send + Sync {
    /// Catalog-unique, non-empty id.
    fn id(&self) -> &str;

    /// Called when the dialog is pushed onto the stack.
    async fn begin(
        &self,
        dc: &mut DialogContext<'_>,
        options: Option<Value>,
    ) -> Result<DialogTurnResult>;

    /// Called when the dialog is on top of the stack and a new turn arrives.
    ///
    /// The default completes the dialog without a value.
    async fn continue_dialog(&self, dc: &mut DialogContext<'_>) -> Result<DialogTurnResult> {
        let _ = dc;
        Ok(DialogTurnResult::Complete(None))
    }

    /// Called when a child dialog completed and this dialog is on top again.
    ///
    /// The default completes this dialog too, passing the child's result up.
    async fn resume(
        &self,
        dc: &mut DialogContext<'_>,
        reason: DialogReason,
        result: Option<Value>,
    ) -> Result<DialogTurnResult> {
        let _ = (dc, reason);
        Ok(DialogTurnResult::Complete(result))
    }
}
