use super::catalog::DialogCatalog;
use super::context::DialogContext;
use crate::config::DialogConfig;
use crate::error::Result;
use crate::state::{ConversationKey, TurnStateAccessor};
use crate::turn::TurnContext;
use std::sync::Arc;

/// Binds a dialog catalog to the state accessor that persists dialog stacks.
///
/// `DialogSet` is the entry point of a turn: `create_context` loads the
/// conversation's stack and `save_context` writes it back. Nothing is cached
/// between the two; a turn that fails in between simply never saves.
#[derive(Clone)]
pub struct DialogSet {
    catalog: Arc<DialogCatalog>,
    accessor: TurnStateAccessor,
    config: DialogConfig,
}

impl DialogSet {
    pub fn new(
        catalog: Arc<DialogCatalog>,
        accessor: TurnStateAccessor,
        config: DialogConfig,
    ) -> Self {
        Self {
            catalog,
            accessor,
            config,
        }
    }

    pub fn catalog(&self) -> &DialogCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn accessor(&self) -> &TurnStateAccessor {
        &self.accessor
    }

    /// The storage key of the turn's conversation.
    pub fn conversation_key(&self, turn: &TurnContext) -> Result<ConversationKey> {
        turn.conversation_key(&self.config.state_property)
    }

    /// Loads the conversation's dialog stack and binds it to a new context.
    ///
    /// A conversation without stored state starts with an empty stack.
    pub async fn create_context<'a>(&'a self, turn: &'a TurnContext) -> Result<DialogContext<'a>> {
        let key = self.conversation_key(turn)?;
        let snapshot = self.accessor.load(&key).await?;
        Ok(DialogContext::new(&self.catalog, turn, snapshot, &self.config))
    }

    /// Persists the stack of a finished turn.
    pub async fn save_context(&self, turn: &TurnContext, dc: DialogContext<'_>) -> Result<()> {
        let key = self.conversation_key(turn)?;
        self.accessor.save(&key, &dc.into_snapshot()).await
    }
}
