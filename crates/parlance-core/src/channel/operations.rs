//! Channel operations trait.
//!
//! Defines the out-of-band channel actions dialogs may need during a turn.

use super::model::{Activity, ChannelAccount, ChannelInfo, ConversationReference, TeamDetails};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for channel actions that are not part of the dialog stack.
///
/// Implementations wrap a messaging platform's connector API for one service
/// endpoint. Transport and authentication failures must surface as
/// `DialogError::ChannelUnavailable`; retry policy belongs to the implementation.
#[async_trait]
pub trait ChannelOperations: Send + Sync {
    /// Starts a new conversation in a team channel and posts `activity` to it.
    ///
    /// # Returns
    ///
    /// - `Ok((reference, activity_id))`: Reference to the new conversation and the id of the posted activity
    /// - `Err(_)`: The connector could not be reached or rejected the request
    async fn send_to_channel(
        &self,
        conversation: &ConversationReference,
        activity: &Activity,
        channel_id: &str,
    ) -> Result<(ConversationReference, String)>;

    /// Fetches team metadata.
    async fn get_team_details(&self, team_id: &str) -> Result<TeamDetails>;

    /// Lists the channels of a team.
    async fn get_channels(&self, team_id: &str) -> Result<Vec<ChannelInfo>>;

    /// Lists the members of a conversation (or of a team, when given a team id).
    async fn get_members(&self, conversation_id: &str) -> Result<Vec<ChannelAccount>>;
}
