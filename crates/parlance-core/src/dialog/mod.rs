//! Dialog domain module.
//!
//! # Module Structure
//!
//! - `definition`: the `Dialog` trait every registered dialog implements
//! - `catalog`: id → definition registry (`DialogCatalog`)
//! - `instance`: activation records and the persisted `DialogStackSnapshot`
//! - `stack`: the in-turn `DialogStack`
//! - `context`: turn-scoped orchestration (`DialogContext`)
//! - `set`: catalog + state accessor binding (`DialogSet`)
//! - `turn_result`: `DialogTurnResult` and `DialogReason`

mod catalog;
mod context;
mod definition;
mod instance;
mod set;
mod stack;
mod turn_result;


pub use catalog::DialogCatalog;
pub use context::DialogContext;
pub use definition::Dialog;
pub use instance::{DialogInstance, DialogStackSnapshot};
pub use set::DialogSet;
pub use stack::DialogStack;
pub use turn_result::{DialogReason, DialogTurnResult};
