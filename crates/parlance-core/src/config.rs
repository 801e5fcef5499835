use serde::{Deserialize, Serialize};

/// Default upper bound on the number of simultaneously active dialogs.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 64;

/// Default name of the state property holding the dialog stack.
pub const DEFAULT_STATE_PROPERTY: &str = "DialogState";

/// Dialog runtime settings, read from the `[dialogs]` table of the runtime config.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    /// Maximum stack depth; `None` disables the guard.
    #[serde(default = "default_max_stack_depth")]
    pub max_stack_depth: Option<usize>,
    /// Property name appended to the conversation key in the state store.
    #[serde(default = "default_state_property")]
    pub state_property: String,
}

fn default_max_stack_depth() -> Option<usize> {
    Some(DEFAULT_MAX_STACK_DEPTH)
}

fn default_state_property() -> String {
    DEFAULT_STATE_PROPERTY.to_string()
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            max_stack_depth: default_max_stack_depth(),
            state_property: default_state_property(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_table() {
        let config: DialogConfig = toml::from_str("").unwrap();
        assert_eq!(config, DialogConfig::default());
        assert_eq!(config.max_stack_depth, Some(64));
        assert_eq!(config.state_property, "DialogState");
    }

    #[test]
    fn test_partial_override() {
        let config: DialogConfig = toml::from_str("max_stack_depth = 3").unwrap();
        assert_eq!(config.max_stack_depth, Some(3));
        assert_eq!(config.state_property, "DialogState");
    }
}
