//! Dialog turn service.
//!
//! One turn is: lock the conversation, load its dialog stack, hand a
//! [`DialogContext`] to a [`TurnHandler`], and persist the stack if the
//! handler returned `Ok`. A failed handler leaves the stored stack exactly as
//! it was before the turn.

use crate::conversation_locks::ConversationLocks;
use async_trait::async_trait;
use parlance_core::config::DialogConfig;
use parlance_core::dialog::{DialogCatalog, DialogContext, DialogSet, DialogTurnResult};
use parlance_core::error::Result;
use parlance_core::state::{ConversationKey, StateStore, TurnStateAccessor};
use parlance_core::turn::TurnContext;
use parlance_infrastructure::RuntimeConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bot logic run against the dialog context of one turn.
#[async_trait]
pub trait TurnHandler: Send + Sync {
    async fn on_turn(&self, dc: &mut DialogContext<'_>) -> Result<DialogTurnResult>;
}

/// Continues the active dialog, or begins the root dialog when none is active.
#[derive(Debug, Clone)]
pub struct RootDialogHandler {
    root_id: String,
    options: Option<Value>,
}

impl RootDialogHandler {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            options: None,
        }
    }

    /// Options passed to the root dialog's `begin`.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }
}

#[async_trait]
impl TurnHandler for RootDialogHandler {
    async fn on_turn(&self, dc: &mut DialogContext<'_>) -> Result<DialogTurnResult> {
        let result = dc.continue_dialog().await?;
        if !result.is_empty() {
            return Ok(result);
        }
        debug!(dialog_id = %self.root_id, "no active dialog, beginning root");
        dc.begin(&self.root_id, self.options.clone()).await
    }
}

/// Runs turns against a [`DialogSet`], one at a time per conversation.
pub struct DialogTurnService {
    dialogs: DialogSet,
    locks: ConversationLocks,
}

impl DialogTurnService {
    pub fn new(dialogs: DialogSet) -> Self {
        Self {
            dialogs,
            locks: ConversationLocks::new(),
        }
    }

    /// Wires a catalog to a store with the given dialog settings.
    pub fn with_store(
        catalog: Arc<DialogCatalog>,
        store: Arc<dyn StateStore>,
        config: DialogConfig,
    ) -> Self {
        Self::new(DialogSet::new(
            catalog,
            TurnStateAccessor::new(store),
            config,
        ))
    }

    /// Builds the service from runtime configuration.
    pub fn from_config(catalog: Arc<DialogCatalog>, config: &RuntimeConfig) -> Result<Self> {
        let store = config.build_state_store()?;
        Ok(Self::with_store(catalog, store, config.dialogs.clone()))
    }

    pub fn dialogs(&self) -> &DialogSet {
        &self.dialogs
    }

    /// Runs `handler` for one turn and saves the stack if it succeeded.
    ///
    /// # Errors
    ///
    /// Whatever loading, the handler, or saving reports. On a handler error
    /// nothing is written.
    pub async fn run_turn(
        &self,
        turn: &TurnContext,
        handler: &dyn TurnHandler,
    ) -> Result<DialogTurnResult> {
        let key = self.dialogs.conversation_key(turn)?;
        let lock = self.locks.lock_for(key.as_str()).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.run_locked(turn, handler, &key).await
        };
        self.locks.release(key.as_str(), lock).await;
        outcome
    }

    async fn run_locked(
        &self,
        turn: &TurnContext,
        handler: &dyn TurnHandler,
        key: &ConversationKey,
    ) -> Result<DialogTurnResult> {
        let mut dc = self.dialogs.create_context(turn).await?;
        let loaded_depth = dc.depth();

        let result = match handler.on_turn(&mut dc).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    conversation = %key,
                    depth = loaded_depth,
                    error = %e,
                    "turn failed, dialog stack not saved"
                );
                return Err(e);
            }
        };

        let depth = dc.depth();
        self.dialogs.save_context(turn, dc).await?;
        info!(
            conversation = %key,
            from_depth = loaded_depth,
            depth,
            outcome = ?result,
            "turn completed"
        );
        Ok(result)
    }

    /// Runs a turn with [`RootDialogHandler`] for `root_id`.
    pub async fn run_dialog(&self, turn: &TurnContext, root_id: &str) -> Result<DialogTurnResult> {
        self.run_turn(turn, &RootDialogHandler::new(root_id)).await
    }

    /// Drops the stored stack of the turn's conversation.
    pub async fn reset(&self, turn: &TurnContext) -> Result<()> {
        let key = self.dialogs.conversation_key(turn)?;
        let lock = self.locks.lock_for(key.as_str()).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.dialogs.accessor().delete(&key).await
        };
        self.locks.release(key.as_str(), lock).await;

        outcome?;
        info!(conversation = %key, "dialog stack reset");
        Ok(())
    }

    /// Number of conversations with a turn in flight or waiting.
    pub async fn active_conversations(&self) -> usize {
        self.locks.len().await
    }
}
