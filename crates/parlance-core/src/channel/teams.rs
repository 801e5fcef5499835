//! Team-scope helpers over inbound activities.

use super::model::Activity;

/// Returns the team id carried in an activity's channel data.
///
/// Activities from a team conversation carry `channelData.team.id`; personal
/// and group chats do not, in which case this returns `None`.
pub fn team_id(activity: &Activity) -> Option<String> {
    activity
        .channel_data
        .as_ref()
        .and_then(|data| data.get("team"))
        .and_then(|team| team.get("id"))
        .and_then(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
