//! Turn context: the inbound activity plus the channel capability for one turn.

use crate::channel::{
    Activity, ChannelAccount, ChannelInfo, ChannelOperations, ConversationReference, TeamDetails,
    teams,
};
use crate::error::{DialogError, Result};
use crate::state::ConversationKey;
use std::fmt;
use std::sync::Arc;

/// Everything known about the turn being processed.
///
/// Dialogs reach the channel through the helpers here rather than holding a
/// connector themselves; a turn built without a channel client reports
/// `ChannelUnavailable` from every channel helper.
#[derive(Clone)]
pub struct TurnContext {
    activity: Activity,
    channel: Option<Arc<dyn ChannelOperations>>,
}

impl TurnContext {
    pub fn new(activity: Activity) -> Self {
        Self {
            activity,
            channel: None,
        }
    }

    /// Attaches the channel client used by the channel helpers.
    pub fn with_channel(mut self, channel: Arc<dyn ChannelOperations>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Storage key for this turn's conversation under `property`.
    pub fn conversation_key(&self, property: &str) -> Result<ConversationKey> {
        ConversationKey::new(
            &self.activity.channel_id,
            &self.activity.conversation.id,
            property,
        )
    }

    /// Reference to the conversation this turn belongs to.
    pub fn conversation_reference(&self) -> ConversationReference {
        ConversationReference::from_activity(&self.activity)
    }

    /// Team id of the conversation, when the turn comes from a team.
    pub fn team_id(&self) -> Option<String> {
        teams::team_id(&self.activity)
    }

    fn channel(&self) -> Result<&Arc<dyn ChannelOperations>> {
        self.channel.as_ref().ok_or_else(|| {
            DialogError::channel_unavailable("no channel client attached to this turn")
        })
    }

    fn resolve_team_id(&self, team_id: Option<&str>, operation: &str) -> Result<String> {
        match team_id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(id.to_string()),
            None => self.team_id().ok_or_else(|| {
                DialogError::invalid_argument(format!(
                    "{}: only valid within the scope of a team",
                    operation
                ))
            }),
        }
    }

    /// Posts `activity` as a new conversation in the team channel `channel_id`.
    ///
    /// # Returns
    ///
    /// The reference to the created conversation and the id of the posted activity.
    pub async fn send_message_to_channel(
        &self,
        activity: &Activity,
        channel_id: &str,
    ) -> Result<(ConversationReference, String)> {
        if channel_id.is_empty() {
            return Err(DialogError::invalid_argument(
                "send_message_to_channel: channel_id cannot be empty",
            ));
        }
        let reference = self.conversation_reference();
        self.channel()?
            .send_to_channel(&reference, activity, channel_id)
            .await
    }

    /// Fetches team details, defaulting to the turn's own team.
    pub async fn team_details(&self, team_id: Option<&str>) -> Result<TeamDetails> {
        let team_id = self.resolve_team_id(team_id, "team_details")?;
        self.channel()?.get_team_details(&team_id).await
    }

    /// Lists the channels of a team, defaulting to the turn's own team.
    pub async fn team_channels(&self, team_id: Option<&str>) -> Result<Vec<ChannelInfo>> {
        let team_id = self.resolve_team_id(team_id, "team_channels")?;
        self.channel()?.get_channels(&team_id).await
    }

    /// Lists the members of a team, defaulting to the turn's own team.
    pub async fn team_members(&self, team_id: Option<&str>) -> Result<Vec<ChannelAccount>> {
        let team_id = self.resolve_team_id(team_id, "team_members")?;
        self.channel()?.get_members(&team_id).await
    }

    /// Lists the roster: the whole team inside a team, otherwise the conversation's members.
    pub async fn members(&self) -> Result<Vec<ChannelAccount>> {
        if let Some(team_id) = self.team_id() {
            return self.team_members(Some(&team_id)).await;
        }
        let conversation_id = &self.activity.conversation.id;
        if conversation_id.is_empty() {
            return Err(DialogError::invalid_argument(
                "members: conversation id cannot be empty",
            ));
        }
        self.channel()?.get_members(conversation_id).await
    }
}

impl fmt::Debug for TurnContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnContext")
            .field("activity", &self.activity)
            .field("has_channel", &self.channel.is_some())
            .finish()
    }
}
