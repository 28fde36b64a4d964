use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File counts for one stage
#[derive(Debug, Clone, Serialize)]
pub struct StageTally {
    pub name: String,
    pub root: PathBuf,
    pub missing: bool,
    /// Files directly under the stage root
    pub unassigned: usize,
    pub per_channel: BTreeMap<String, usize>,
}

impl StageTally {
    pub fn new(name: &str, root: &Path) -> Self {
        Self {
            name: name.to_string(),
            root: root.to_path_buf(),
            missing: false,
            unassigned: 0,
            per_channel: BTreeMap::new(),
        }
    }

    pub fn count(&self, channel: &str) -> usize {
        self.per_channel.get(channel).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.per_channel.values().sum::<usize>() + self.unassigned
    }
}

/// One channel's counts, indexed by stage order
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelTally {
    pub channel: String,
    pub counts: Vec<usize>,
}

impl ChannelTally {
    /// Index of the first stage holding fewer files than the stage before it
    pub fn drop_off(&self) -> Option<usize> {
        self.counts
            .windows(2)
            .position(|w| w[1] < w[0])
            .map(|i| i + 1)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub lines: usize,
}

/// Everything the `status` command reports
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub stages: Vec<String>,
    pub channels: Vec<ChannelTally>,
    /// Sums over reported channels, excluding unassigned files
    pub stage_totals: Vec<usize>,
    pub missing_stages: Vec<String>,
    pub unassigned: BTreeMap<String, usize>,
    pub outputs: Vec<OutputFile>,
    pub total_output_lines: usize,
}
