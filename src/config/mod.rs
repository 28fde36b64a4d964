pub mod paths;
pub mod stages;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::errors::{PipelineError, Result};

pub use paths::PathConfig;
pub use stages::{StageConfig, StageSpec};
pub use validation::ValidationConfig;

/// Command-line values layered over the file config
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces both `data_dir` and `output_dir`
    pub root: Option<PathBuf>,
    /// Replaces the configured fields when non-empty
    pub label_fields: Vec<String>,
    pub max_reported_errors: Option<usize>,
    /// Can only switch following on
    pub follow_symlinks: bool,
}

/// Top-level configuration shared by every command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub paths: PathConfig,
    pub stages: StageConfig,
    pub validation: ValidationConfig,
}

impl Config {
    pub fn for_root(root: &Path) -> Self {
        Self {
            paths: PathConfig::for_root(root),
            ..Default::default()
        }
    }

    /// Load and validate a JSON config file; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it, so overrides can still
    /// fill in what the file leaves empty.
    pub fn read_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| PipelineError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults or a config file, then command-line overrides, then validation.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::read_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(root) = &overrides.root {
            let rooted = PathConfig::for_root(root);
            self.paths.data_dir = rooted.data_dir;
            self.paths.output_dir = rooted.output_dir;
        }
        if !overrides.label_fields.is_empty() {
            self.validation.label_fields = overrides.label_fields.clone();
        }
        if let Some(max) = overrides.max_reported_errors {
            self.validation.max_reported_errors = max;
        }
        if overrides.follow_symlinks {
            self.validation.follow_symlinks = true;
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(format!("cannot serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.stages.stages.is_empty() {
            return Err(PipelineError::Config("no stages configured".to_string()));
        }
        let mut seen = HashSet::new();
        for stage in &self.stages.stages {
            if !seen.insert(stage.name.as_str()) {
                return Err(PipelineError::Config(format!(
                    "duplicate stage name '{}'",
                    stage.name
                )));
            }
        }
        if self.validation.label_fields.is_empty() {
            return Err(PipelineError::Config(
                "at least one label field is required".to_string(),
            ));
        }
        Ok(())
    }
}
