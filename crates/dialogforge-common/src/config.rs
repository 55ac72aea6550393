//! Configuration types for DialogForge
//!
//! Settings arrive from the external build descriptor already parsed into
//! these structures; the plugin core never reads files itself.

use serde::{Deserialize, Serialize};

/// Root configuration for a DialogForge run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Package prefix limiting which annotated classes are processed;
    /// `None` processes every class handed to the plugin
    pub component_prefix: Option<String>,
    /// Ordered exception rules deciding which failures abort the build
    /// (see the selective exception handler for the rule grammar)
    pub terminate_on: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            component_prefix: None,
            terminate_on: vec!["all".to_string()],
        }
    }
}

impl PluginConfig {
    /// The `terminate_on` rules joined back into the descriptor form
    #[must_use]
    pub fn terminate_on_setting(&self) -> String {
        self.terminate_on.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_halts_on_all() {
        let config = PluginConfig::default();
        assert_eq!(config.terminate_on, vec!["all".to_string()]);
        assert!(config.component_prefix.is_none());
    }

    #[test]
    fn test_deserialize_partial_descriptor() {
        let config: PluginConfig = serde_json::from_str(
            r#"{"terminate_on": ["!java.lang.NullPointerException", "all"]}"#,
        )
        .unwrap();
        assert_eq!(config.terminate_on.len(), 2);
        assert!(config.component_prefix.is_none());
        assert_eq!(
            config.terminate_on_setting(),
            "!java.lang.NullPointerException, all"
        );
    }
}
