//! Dialog stack runtime for conversational bots.
//!
//! A conversation's active dialogs form a LIFO stack that is loaded at the
//! start of every turn, driven by a [`dialog::DialogContext`], and saved back
//! when the turn finishes.
//!
//! ```ignore
//! use parlance_core::dialog::{DialogCatalog, DialogSet};
//!
//! let catalog = Arc::new(DialogCatalog::new().with_dialog(GreetDialog)?);
//! let dialogs = DialogSet::new(catalog, TurnStateAccessor::new(store), DialogConfig::default());
//!
//! let mut dc = dialogs.create_context(&turn).await?;
//! if dc.continue_dialog().await?.is_empty() {
//!     dc.begin("greet", None).await?;
//! }
//! dialogs.save_context(&turn, dc).await?;
//! ```

pub mod channel;
pub mod config;
pub mod dialog;
pub mod error;
pub mod state;
pub mod turn;

pub use error::{DialogError, Result};
