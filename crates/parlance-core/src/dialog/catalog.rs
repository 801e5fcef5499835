use super::definition::Dialog;
use crate::error::{DialogError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registry of dialog definitions keyed by id.
///
/// The catalog is built once at startup and then shared read-only (usually
/// behind an `Arc`) with every turn's `DialogContext`. Ids are unique;
/// registering an id twice is a configuration error, never an overwrite.
#[derive(Clone, Default)]
pub struct DialogCatalog {
    dialogs: HashMap<String, Arc<dyn Dialog>>,
}

impl DialogCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dialog definition.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the dialog id is empty
    /// - `DuplicateDialogId` if the id is already registered
    pub fn register(&mut self, dialog: Arc<dyn Dialog>) -> Result<&mut Self> {
        let id = dialog.id();
        if id.is_empty() {
            return Err(DialogError::invalid_argument(
                "DialogCatalog::register: dialog id cannot be empty",
            ));
        }
        if self.dialogs.contains_key(id) {
            return Err(DialogError::duplicate(id));
        }

        debug!(dialog_id = %id, "registered dialog");
        self.dialogs.insert(id.to_string(), dialog);
        Ok(self)
    }

    /// Builder-style registration, for constructing a catalog in one expression.
    pub fn with_dialog(mut self, dialog: impl Dialog + 'static) -> Result<Self> {
        self.register(Arc::new(dialog))?;
        Ok(self)
    }

    /// Looks up a dialog by id; `None` if it is not registered.
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn Dialog>> {
        self.dialogs.get(id).cloned()
    }

    /// Like [`lookup`](Self::lookup), but rejects an empty id as a caller error.
    pub fn find(&self, id: &str) -> Result<Option<Arc<dyn Dialog>>> {
        if id.is_empty() {
            return Err(DialogError::invalid_argument(
                "DialogCatalog::find: dialog id cannot be empty",
            ));
        }
        Ok(self.lookup(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.dialogs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.dialogs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for DialogCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogCatalog")
            .field("dialogs", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{DialogContext, DialogTurnResult};
    use async_trait::async_trait;
    use serde_json::Value;

    struct Named(&'static str);

    #[async_trait]
    impl Dialog for Named {
        fn id(&self) -> &str {
            self.0
        }

        async fn begin(
            &self,
            _dc: &mut DialogContext<'_>,
            _options: Option<Value>,
        ) -> Result<DialogTurnResult> {
            Ok(DialogTurnResult::Waiting)
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = DialogCatalog::new();
        catalog
            .register(Arc::new(Named("greet")))
            .unwrap()
            .register(Arc::new(Named("farewell")))
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("greet").unwrap().id(), "greet");
        assert!(catalog.lookup("missing").is_none());
        assert_eq!(catalog.ids(), vec!["farewell", "greet"]);
    }

    #[test]
    fn test_duplicate_id_is_rejected_and_first_kept() {
        let mut catalog = DialogCatalog::new().with_dialog(Named("greet")).unwrap();
        let err = catalog.register(Arc::new(Named("greet"))).unwrap_err();

        assert_eq!(err, DialogError::duplicate("greet"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_id_is_invalid() {
        let mut catalog = DialogCatalog::new();
        let err = catalog.register(Arc::new(Named(""))).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_find_rejects_empty_id() {
        let catalog = DialogCatalog::new().with_dialog(Named("greet")).unwrap();
        assert!(matches!(catalog.find(""), Err(e) if e.is_invalid_argument()));
        assert!(catalog.find("greet").unwrap().is_some());
        assert!(catalog.find("other").unwrap().is_none());
    }
}
