//! Per-file JSON Lines validation

use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::labels::LabelDistribution;
use super::nan::find_non_finite;
use crate::config::ValidationConfig;
use crate::errors::{PipelineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Parse,
    NonFinite,
}

/// A problem on a single line (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineIssue {
    pub line: usize,
    pub kind: IssueKind,
    pub message: String,
}

/// Validation result for one JSONL file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub total_lines: usize,
    pub valid: usize,
    pub blank: usize,
    /// Valid JSON whose top-level value is not an object
    pub non_object: usize,
    pub parse_errors: usize,
    pub nan_lines: usize,
    /// First issues only; the counters above are complete
    pub issues: Vec<LineIssue>,
    pub labels: Vec<LabelDistribution>,
}

impl FileReport {
    fn new(path: &Path, label_fields: &[String]) -> Self {
        Self {
            path: path.to_path_buf(),
            total_lines: 0,
            valid: 0,
            blank: 0,
            non_object: 0,
            parse_errors: 0,
            nan_lines: 0,
            issues: Vec::new(),
            labels: label_fields.iter().map(|f| LabelDistribution::new(f)).collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.parse_errors == 0 && self.nan_lines == 0
    }

    fn push_issue(&mut self, issue: LineIssue, limit: usize) {
        if self.issues.len() < limit {
            self.issues.push(issue);
        }
    }

    fn check_line(&mut self, number: usize, raw: &[u8], config: &ValidationConfig) {
        let limit = config.max_reported_errors;
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                self.parse_errors += 1;
                self.push_issue(
                    LineIssue {
                        line: number,
                        kind: IssueKind::Parse,
                        message: format!("invalid UTF-8: {}", e),
                    },
                    limit,
                );
                return;
            }
        };

        if line.trim().is_empty() {
            self.blank += 1;
            return;
        }

        if let Some(hit) = find_non_finite(line) {
            self.nan_lines += 1;
            self.push_issue(
                LineIssue {
                    line: number,
                    kind: IssueKind::NonFinite,
                    message: format!("non-finite token '{}' at byte {}", hit.token, hit.offset),
                },
                limit,
            );
            return;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(record) => {
                self.valid += 1;
                if record.is_object() {
                    for dist in &mut self.labels {
                        dist.observe(&record);
                    }
                } else {
                    self.non_object += 1;
                    for dist in &mut self.labels {
                        dist.record_missing();
                    }
                }
            }
            Err(e) => {
                self.parse_errors += 1;
                self.push_issue(
                    LineIssue {
                        line: number,
                        kind: IssueKind::Parse,
                        message: e.to_string(),
                    },
                    limit,
                );
            }
        }
    }
}

/// Validate every line of a JSONL file.
pub fn validate_file(path: &Path, config: &ValidationConfig) -> Result<FileReport> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut report = FileReport::new(path, &config.label_fields);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| PipelineError::io(path, e))?;
        if n == 0 {
            break;
        }
        report.total_lines += 1;
        report.check_line(report.total_lines, trim_newline(&buf), config);
    }

    debug!(
        "validated {}: {} lines, {} valid, {} parse errors, {} NaN lines",
        path.display(),
        report.total_lines,
        report.valid,
        report.parse_errors,
        report.nan_lines
    );
    Ok(report)
}

fn trim_newline(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// Results across several files, with label counts merged per field
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub files: Vec<FileReport>,
    pub combined_labels: Vec<LabelDistribution>,
}

impl ValidationSummary {
    pub fn from_reports(files: Vec<FileReport>, label_fields: &[String]) -> Self {
        let mut combined: Vec<LabelDistribution> =
            label_fields.iter().map(|f| LabelDistribution::new(f)).collect();
        for report in &files {
            for (acc, dist) in combined.iter_mut().zip(&report.labels) {
                acc.merge(dist);
            }
        }
        Self {
            files,
            combined_labels: combined,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.files.iter().all(FileReport::is_clean)
    }

    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.total_lines).sum()
    }

    pub fn total_valid(&self) -> usize {
        self.files.iter().map(|f| f.valid).sum()
    }
}

/// Validate a list of files, stopping at the first unreadable one.
pub fn validate_files(paths: &[PathBuf], config: &ValidationConfig) -> Result<ValidationSummary> {
    let reports = paths
        .iter()
        .map(|p| validate_file(p, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(ValidationSummary::from_reports(reports, &config.label_fields))
}
