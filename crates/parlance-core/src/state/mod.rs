//! Turn state module.
//!
//! - `store`: key-value persistence trait (`StateStore`)
//! - `key`: per-conversation storage key (`ConversationKey`)
//! - `accessor`: snapshot load/save over a store (`TurnStateAccessor`)

mod accessor;
mod key;
mod store;

pub use accessor::TurnStateAccessor;
pub use key::ConversationKey;
pub use store::StateStore;
