//! Channel domain module.
//!
//! Plain conversation/activity records and the `ChannelOperations` seam that
//! connector clients implement.

mod model;
mod operations;
pub mod teams;

pub use model::{
    Activity, ChannelAccount, ChannelInfo, ConversationAccount, ConversationReference,
    TeamDetails,
};
pub use operations::ChannelOperations;
