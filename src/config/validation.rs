use serde::{Deserialize, Serialize};

/// JSONL validation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fields tallied per record; dotted names reach into nested objects
    pub label_fields: Vec<String>,
    pub max_reported_errors: usize,
    pub follow_symlinks: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            label_fields: vec!["label".to_string(), "interaction_type".to_string()],
            max_reported_errors: 10,
            follow_symlinks: false,
        }
    }
}
