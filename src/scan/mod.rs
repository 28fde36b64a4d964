//! Per-channel file tallies across pipeline stages
//!
//! Every stage directory holds one sub-directory per channel:
//!
//! ```text
//! <data_dir>/audio/<channel>/**/*.mp3
//! <data_dir>/transcripts/<channel>/**/*.json
//! ...
//! ```
//!
//! Files sitting directly in a stage directory belong to no channel and are
//! reported as unassigned.

pub mod tally;

pub use tally::{ChannelTally, OutputFile, PipelineSummary, StageTally};

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{Config, StageSpec};
use crate::data::lines::{count_lines, has_extension, is_file_entry, walk_error};
use crate::errors::Result;

/// Count accepted files per channel in one stage directory.
pub fn scan_stage(spec: &StageSpec, data_dir: &Path, follow_symlinks: bool) -> Result<StageTally> {
    let root = data_dir.join(&spec.dir);
    let mut tally = StageTally::new(&spec.name, &root);

    if !root.is_dir() {
        warn!("stage '{}' directory not found: {}", spec.name, root.display());
        tally.missing = true;
        return Ok(tally);
    }

    let walker = WalkDir::new(&root)
        .follow_links(follow_symlinks)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(&root, e))?;
        if !is_file_entry(&entry) || !spec.accepts(entry.path()) {
            continue;
        }
        match channel_of(&root, entry.path()) {
            Some(channel) => *tally.per_channel.entry(channel).or_insert(0) += 1,
            None => tally.unassigned += 1,
        }
    }

    debug!(
        "stage '{}': {} files over {} channels ({} unassigned)",
        spec.name,
        tally.total(),
        tally.per_channel.len(),
        tally.unassigned
    );
    Ok(tally)
}

/// Tally every configured stage and line-count the output files.
///
/// With a non-empty `channel_filter` only those channels are reported, and
/// requested channels that were never seen appear with zero counts.
pub fn scan_pipeline(config: &Config, channel_filter: &[String]) -> Result<PipelineSummary> {
    let data_dir = config.paths.data_dir();
    let follow = config.validation.follow_symlinks;

    let stages = config
        .stages
        .stages
        .iter()
        .map(|spec| scan_stage(spec, &data_dir, follow))
        .collect::<Result<Vec<_>>>()?;

    let mut channels: BTreeSet<String> = stages
        .iter()
        .flat_map(|s| s.per_channel.keys().cloned())
        .collect();
    if !channel_filter.is_empty() {
        channels = channel_filter.iter().cloned().collect();
    }

    let channel_tallies = channels
        .into_iter()
        .map(|channel| {
            let counts = stages.iter().map(|s| s.count(&channel)).collect();
            ChannelTally { channel, counts }
        })
        .collect::<Vec<_>>();

    let stage_totals: Vec<usize> = (0..stages.len())
        .map(|i| channel_tallies.iter().map(|c| c.counts[i]).sum::<usize>())
        .collect();

    let outputs = scan_outputs(
        &config.paths.output_dir(),
        &config.paths.output_extension,
        follow,
    )?;
    let total_output_lines: usize = outputs.iter().map(|o| o.lines).sum();

    Ok(PipelineSummary {
        stages: stages.iter().map(|s| s.name.clone()).collect(),
        missing_stages: stages
            .iter()
            .filter(|s| s.missing)
            .map(|s| s.name.clone())
            .collect(),
        unassigned: stages
            .iter()
            .filter(|s| s.unassigned > 0)
            .map(|s| (s.name.clone(), s.unassigned))
            .collect::<BTreeMap<_, _>>(),
        channels: channel_tallies,
        stage_totals,
        outputs,
        total_output_lines,
    })
}

/// Line counts for every output file under `dir`.
pub fn scan_outputs(dir: &Path, extension: &str, follow_symlinks: bool) -> Result<Vec<OutputFile>> {
    if !dir.is_dir() {
        warn!("output directory not found: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut outputs = Vec::new();
    for entry in WalkDir::new(dir).follow_links(follow_symlinks).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if is_file_entry(&entry) && has_extension(entry.path(), Some(extension)) {
            let lines = count_lines(entry.path())?;
            outputs.push(OutputFile {
                path: entry.into_path(),
                lines,
            });
        }
    }
    Ok(outputs)
}

/// First path component below the stage root, if the file is nested.
fn channel_of(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut components = rel.components();
    let first = components.next()?;
    // A single component means the file sits in the stage root itself
    components.next()?;
    match first {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
