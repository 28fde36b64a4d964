use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathConfig {
    /// Root holding one directory per stage
    pub data_dir: String,
    /// Aggregated training-data output
    pub output_dir: String,
    pub output_extension: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            output_dir: "data/training".to_string(),
            output_extension: "jsonl".to_string(),
        }
    }
}

impl PathConfig {
    pub fn for_root(root: &Path) -> Self {
        Self {
            data_dir: root.display().to_string(),
            output_dir: root.join("training").display().to_string(),
            ..Default::default()
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}
