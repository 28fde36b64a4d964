//! Console rendering for scan and validation results

use std::fmt::Write;

use crate::data::{FileReport, IssueKind, LabelDistribution, ValidationSummary};
use crate::scan::PipelineSummary;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Channel × stage table followed by output line counts.
pub fn render_pipeline(summary: &PipelineSummary) -> String {
    let mut out = String::new();
    let name_width = summary
        .channels
        .iter()
        .map(|c| c.channel.chars().count())
        .chain(std::iter::once("channel".len()))
        .max()
        .unwrap_or(7);
    let col_widths: Vec<usize> = summary
        .stages
        .iter()
        .zip(&summary.stage_totals)
        .map(|(name, total)| name.len().max(total.to_string().len()).max(5))
        .collect();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Pipeline Status");
    let _ = writeln!(out, "{}", RULE);

    let _ = write!(out, "{:<width$}", "channel", width = name_width);
    for (stage, w) in summary.stages.iter().zip(&col_widths) {
        let _ = write!(out, "  {:>w$}", stage, w = *w);
    }
    let _ = writeln!(out);

    for channel in &summary.channels {
        let _ = write!(out, "{:<width$}", channel.channel, width = name_width);
        for (count, w) in channel.counts.iter().zip(&col_widths) {
            let _ = write!(out, "  {:>w$}", count, w = *w);
        }
        if let Some(stage) = channel.drop_off().and_then(|idx| summary.stages.get(idx)) {
            let _ = write!(out, "  ⚠️  drops at {}", stage);
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "{:<width$}", "TOTAL", width = name_width);
    for (total, w) in summary.stage_totals.iter().zip(&col_widths) {
        let _ = write!(out, "  {:>w$}", total, w = *w);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Channels: {}", summary.channels.len());

    for (stage, count) in &summary.unassigned {
        let _ = writeln!(out, "Unassigned files in {}: {}", stage, count);
    }
    if !summary.missing_stages.is_empty() {
        let _ = writeln!(out, "Missing stages: {}", summary.missing_stages.join(", "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Output files");
    if summary.outputs.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for output in &summary.outputs {
        let _ = writeln!(out, "  {:>10}  {}", output.lines, output.path.display());
    }
    let _ = writeln!(out, "  {:>10}  total lines", summary.total_output_lines);

    out
}

/// Per-file validation details followed by an overall verdict.
pub fn render_validation(summary: &ValidationSummary) -> String {
    let mut out = String::new();

    for report in &summary.files {
        render_file(&mut out, report);
    }

    if summary.files.len() > 1 {
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "Combined ({} files)", summary.files.len());
        let _ = writeln!(out, "{}", RULE);
        for dist in &summary.combined_labels {
            render_labels(&mut out, dist);
        }
    }

    let _ = writeln!(out);
    let failed = summary.files.iter().filter(|f| !f.is_clean()).count();
    if failed == 0 {
        let _ = writeln!(
            out,
            "✓ OK: {} files, {} lines, {} valid records",
            summary.files.len(),
            summary.total_lines(),
            summary.total_valid()
        );
    } else {
        let _ = writeln!(
            out,
            "✗ FAILED: {} of {} files have invalid lines",
            failed,
            summary.files.len()
        );
    }
    out
}

fn render_file(out: &mut String, report: &FileReport) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", report.path.display());
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  Lines:         {}", report.total_lines);
    let _ = writeln!(out, "  Valid:         {}", report.valid);
    if report.blank > 0 {
        let _ = writeln!(out, "  Blank:         {}", report.blank);
    }
    if report.non_object > 0 {
        let _ = writeln!(out, "  Non-object:    {}", report.non_object);
    }
    let _ = writeln!(out, "  Parse errors:  {}", report.parse_errors);
    let _ = writeln!(out, "  NaN lines:     {}", report.nan_lines);

    for issue in &report.issues {
        let tag = match issue.kind {
            IssueKind::Parse => "parse",
            IssueKind::NonFinite => "nan",
        };
        let _ = writeln!(out, "    line {:>6} [{}] {}", issue.line, tag, issue.message);
    }
    let hidden = report.parse_errors + report.nan_lines - report.issues.len();
    if hidden > 0 {
        let _ = writeln!(out, "    ... {} more", hidden);
    }

    for dist in &report.labels {
        render_labels(out, dist);
    }
    let _ = writeln!(out);
}

fn render_labels(out: &mut String, dist: &LabelDistribution) {
    let _ = writeln!(out, "  Label '{}':", dist.field);
    if dist.counts.is_empty() {
        let _ = writeln!(out, "    (no values)");
    }
    for (key, count) in dist.sorted() {
        let _ = writeln!(
            out,
            "    {:<24} {:>8}  ({:.1}%)",
            key,
            count,
            100.0 * dist.fraction(key)
        );
    }
    if dist.missing > 0 {
        let _ = writeln!(out, "    {:<24} {:>8}", "<missing>", dist.missing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{ChannelTally, OutputFile};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[test]
    fn test_render_pipeline_marks_drop_off() {
        let summary = PipelineSummary {
            stages: vec!["audio".to_string(), "transcripts".to_string()],
            channels: vec![
                ChannelTally {
                    channel: "steady".to_string(),
                    counts: vec![2, 2],
                },
                ChannelTally {
                    channel: "lagging".to_string(),
                    counts: vec![4, 1],
                },
            ],
            stage_totals: vec![6, 3],
            missing_stages: vec![],
            unassigned: BTreeMap::new(),
            outputs: vec![OutputFile {
                path: PathBuf::from("data/training/train.jsonl"),
                lines: 12,
            }],
            total_output_lines: 12,
        };

        let text = render_pipeline(&summary);
        assert!(text.contains("drops at transcripts"));
        assert_eq!(text.matches("drops at").count(), 1);
        assert!(text.contains("train.jsonl"));
        assert!(text.contains("12  total lines"));
    }

    #[test]
    fn test_render_pipeline_tolerates_short_stage_list() {
        let summary = PipelineSummary {
            stages: vec!["audio".to_string()],
            channels: vec![ChannelTally {
                channel: "odd".to_string(),
                counts: vec![3, 1],
            }],
            stage_totals: vec![3],
            missing_stages: vec![],
            unassigned: BTreeMap::new(),
            outputs: vec![],
            total_output_lines: 0,
        };

        let text = render_pipeline(&summary);
        assert!(text.contains("odd"));
        assert!(!text.contains("drops at"));
        assert!(text.contains("(none)"));
    }
}
