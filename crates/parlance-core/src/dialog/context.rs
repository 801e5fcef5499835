//! Turn-scoped dialog orchestration.
//!
//! A `DialogContext` binds the catalog, the current turn and the conversation's
//! dialog stack for the duration of one turn. It is the only writer of the
//! stack while the turn runs and never touches persistence itself: the caller
//! loads the snapshot before the turn and saves [`DialogContext::into_snapshot`]
//! after it, so a failed turn never leaves a half-mutated stack in storage.

use super::catalog::DialogCatalog;
use super::definition::Dialog;
use super::instance::{DialogInstance, DialogStackSnapshot};
use super::stack::DialogStack;
use super::turn_result::{DialogReason, DialogTurnResult};
use crate::config::DialogConfig;
use crate::error::{DialogError, Result};
use crate::turn::TurnContext;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct DialogContext<'a> {
    catalog: &'a DialogCatalog,
    turn: &'a TurnContext,
    stack: DialogStack,
}

impl<'a> DialogContext<'a> {
    /// Binds a loaded snapshot to the catalog and turn.
    pub fn new(
        catalog: &'a DialogCatalog,
        turn: &'a TurnContext,
        snapshot: DialogStackSnapshot,
        config: &DialogConfig,
    ) -> Self {
        Self {
            catalog,
            turn,
            stack: DialogStack::from_snapshot(snapshot, config.max_stack_depth),
        }
    }

    pub fn catalog(&self) -> &'a DialogCatalog {
        self.catalog
    }

    pub fn turn(&self) -> &'a TurnContext {
        self.turn
    }

    pub fn stack(&self) -> &DialogStack {
        &self.stack
    }

    /// The instance on top of the stack.
    pub fn active_dialog(&self) -> Option<&DialogInstance> {
        self.stack.peek()
    }

    /// Mutable access to the top instance, for dialogs updating their own state.
    pub fn active_dialog_mut(&mut self) -> Option<&mut DialogInstance> {
        self.stack.peek_mut()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Copies the current stack without ending the turn.
    pub fn snapshot(&self) -> DialogStackSnapshot {
        self.stack.to_snapshot()
    }

    /// Ends the turn, yielding the stack to persist.
    pub fn into_snapshot(self) -> DialogStackSnapshot {
        self.stack.into_snapshot()
    }

    /// Pushes a new instance of `dialog_id` and runs its `begin`.
    ///
    /// A `Complete` result pops the new instance and resumes the parent,
    /// repeating until some dialog is waiting or the stack is empty.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `dialog_id` is empty
    /// - `DialogNotFound` if the id is not registered; the stack is untouched
    /// - `StackDepthExceeded` if the push would exceed the configured depth
    pub async fn begin(
        &mut self,
        dialog_id: &str,
        options: Option<Value>,
    ) -> Result<DialogTurnResult> {
        let dialog = self.find(dialog_id)?;
        self.begin_resolved(dialog, options, DialogReason::BeginCalled)
            .await
    }

    /// Runs the top dialog's `continue_dialog` for the current turn.
    ///
    /// Returns `Empty` when no dialog is active, which is the normal state of
    /// a fresh conversation.
    ///
    /// # Errors
    ///
    /// `DialogNotFound` if the top instance refers to a dialog that is no
    /// longer registered. The stack is left as loaded so the caller can
    /// decide whether to cancel it.
    pub async fn continue_dialog(&mut self) -> Result<DialogTurnResult> {
        let Some(active_id) = self.stack.peek().map(|instance| instance.id.clone()) else {
            debug!("no active dialog to continue");
            return Ok(DialogTurnResult::Empty);
        };

        let dialog = self.resolve_active(&active_id)?;
        let generation = self.top_generation()?;
        debug!(
            dialog_id = %active_id,
            depth = self.stack.len(),
            "continuing dialog"
        );
        let result = dialog.continue_dialog(self).await?;
        self.settle(result, generation, DialogReason::ContinueCalled)
            .await
    }

    /// Pops the top dialog and hands `result` to its parent.
    ///
    /// If nothing remains below, `Complete(result)` is the turn outcome.
    /// Ending on an empty stack also yields `Complete(result)`.
    pub async fn end_dialog(&mut self, result: Option<Value>) -> Result<DialogTurnResult> {
        match self.stack.pop() {
            Some(ended) => {
                debug!(dialog_id = %ended.id, depth = self.stack.len(), "ended dialog");
                self.bubble(result, DialogReason::EndCalled).await
            }
            None => Ok(DialogTurnResult::Complete(result)),
        }
    }

    /// Swaps the top dialog for a new instance of `dialog_id`.
    ///
    /// The outgoing dialog is discarded without resuming its parent, so the
    /// depth is unchanged unless the new dialog completes immediately. The
    /// id is resolved before anything is popped; an unknown id leaves the
    /// stack exactly as it was.
    pub async fn replace_dialog(
        &mut self,
        dialog_id: &str,
        options: Option<Value>,
    ) -> Result<DialogTurnResult> {
        let dialog = self.find(dialog_id)?;
        if let Some(replaced) = self.stack.pop() {
            debug!(from = %replaced.id, to = %dialog_id, "replacing dialog");
        }
        self.begin_resolved(dialog, options, DialogReason::ReplaceCalled)
            .await
    }

    /// Discards every active dialog without resuming anything.
    ///
    /// Returns `Cancelled`, or `Empty` if nothing was active.
    pub fn cancel_all_dialogs(&mut self) -> DialogTurnResult {
        let dropped = self.stack.clear();
        if dropped == 0 {
            return DialogTurnResult::Empty;
        }
        debug!(dropped, "cancelled all dialogs");
        DialogTurnResult::Cancelled
    }

    fn find(&self, dialog_id: &str) -> Result<Arc<dyn Dialog>> {
        self.catalog
            .find(dialog_id)?
            .ok_or_else(|| DialogError::not_found(dialog_id))
    }

    fn top_generation(&self) -> Result<u64> {
        self.stack
            .top_generation()
            .ok_or_else(|| DialogError::internal("dialog stack is unexpectedly empty"))
    }

    fn resolve_active(&self, dialog_id: &str) -> Result<Arc<dyn Dialog>> {
        self.catalog.lookup(dialog_id).ok_or_else(|| {
            warn!(
                dialog_id = %dialog_id,
                depth = self.stack.len(),
                "active dialog is not registered in the catalog"
            );
            DialogError::not_found(dialog_id)
        })
    }

    async fn begin_resolved(
        &mut self,
        dialog: Arc<dyn Dialog>,
        options: Option<Value>,
        reason: DialogReason,
    ) -> Result<DialogTurnResult> {
        let generation = self.stack.push(DialogInstance::new(dialog.id()))?;
        debug!(dialog_id = %dialog.id(), depth = self.stack.len(), "began dialog");

        let result = dialog.begin(self, options).await?;
        self.settle(result, generation, reason).await
    }

    /// Applies a dialog's own result.
    ///
    /// `generation` identifies the instance that was dispatched. A
    /// completion only pops when that instance is still on top; otherwise
    /// the dialog already ended or replaced itself, that call did the
    /// bubbling, and the result is returned unchanged.
    async fn settle(
        &mut self,
        result: DialogTurnResult,
        generation: u64,
        reason: DialogReason,
    ) -> Result<DialogTurnResult> {
        match result {
            DialogTurnResult::Complete(value)
                if self.stack.top_generation() == Some(generation) =>
            {
                if let Some(done) = self.stack.pop() {
                    debug!(dialog_id = %done.id, depth = self.stack.len(), "dialog completed");
                }
                self.bubble(value, reason).await
            }
            other => Ok(other),
        }
    }

    /// Resumes parents one level at a time with a completed child's value.
    ///
    /// Expects the completed child to be popped already, so no parent is ever
    /// resumed while its child is on the stack.
    async fn bubble(
        &mut self,
        mut value: Option<Value>,
        reason: DialogReason,
    ) -> Result<DialogTurnResult> {
        loop {
            let Some(parent_id) = self.stack.peek().map(|instance| instance.id.clone()) else {
                return Ok(DialogTurnResult::Complete(value));
            };

            let parent = self.resolve_active(&parent_id)?;
            let generation = self.top_generation()?;
            debug!(
                dialog_id = %parent_id,
                depth = self.stack.len(),
                ?reason,
                "resuming parent dialog"
            );

            match parent.resume(self, reason, value).await? {
                DialogTurnResult::Complete(next)
                    if self.stack.top_generation() == Some(generation) =>
                {
                    self.stack.pop();
                    value = next;
                }
                other => return Ok(other),
            }
        }
    }
}
