//! Turn pipeline for the parlance dialog runtime.
//!
//! [`DialogTurnService`] is what a bot adapter calls once per inbound
//! activity: it loads the conversation's dialog stack, lets a
//! [`TurnHandler`] drive it, and saves the result only if the handler
//! succeeded.

pub mod conversation_locks;
pub mod telemetry;
pub mod turn_service;

pub use conversation_locks::ConversationLocks;
pub use turn_service::{DialogTurnService, RootDialogHandler, TurnHandler};
