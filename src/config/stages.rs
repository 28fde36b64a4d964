use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single pipeline stage rooted at `<data_dir>/<dir>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageSpec {
    pub name: String,
    pub dir: String,
    /// Accepted extensions without the leading dot; empty accepts everything
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl StageSpec {
    pub fn new(name: &str, dir: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dir: dir.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Case-insensitive extension check
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Ordered list of stages a channel's media passes through
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StageConfig {
    pub stages: Vec<StageSpec>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                StageSpec::new(
                    "audio",
                    "audio",
                    &["mp3", "wav", "m4a", "flac", "ogg", "opus", "webm"],
                ),
                StageSpec::new("transcripts", "transcripts", &["json", "txt", "vtt", "srt"]),
                StageSpec::new("features", "features", &["json", "npy", "npz"]),
                StageSpec::new("interactions", "interactions", &["jsonl", "json"]),
            ],
        }
    }
}

impl StageConfig {
    pub fn get(&self, name: &str) -> Option<&StageSpec> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name.clone()).collect()
    }
}
