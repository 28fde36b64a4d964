//! CLI command implementations

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pipeline_stats_rs::config::{Config, Overrides};
use pipeline_stats_rs::data::{self, ValidationSummary};
use pipeline_stats_rs::report::{render_pipeline, render_validation};
use pipeline_stats_rs::scan::scan_pipeline;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Config file first, then command-line overrides on top of it
fn load_config(config_path: Option<PathBuf>, overrides: &Overrides) -> Result<Config> {
    let context = match &config_path {
        Some(path) => format!("Failed to load config {}", path.display()),
        None => "Invalid configuration".to_string(),
    };
    let config = Config::load(config_path.as_deref(), overrides).context(context)?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn status(
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    channels: Vec<String>,
    follow_symlinks: bool,
    json: bool,
) -> Result<ExitCode> {
    let overrides = Overrides {
        root,
        follow_symlinks,
        ..Default::default()
    };
    let config = load_config(config_path, &overrides)?;
    info!("scanning pipeline under {}", config.paths.data_dir);

    let summary = scan_pipeline(&config, &channels).with_context(|| {
        format!("Failed to scan pipeline under {}", config.paths.data_dir)
    })?;

    if json {
        print_json(&summary)?;
    } else {
        print!("{}", render_pipeline(&summary));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn validate(
    paths: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    label_fields: Vec<String>,
    max_errors: Option<usize>,
    follow_symlinks: bool,
    json: bool,
) -> Result<ExitCode> {
    let overrides = Overrides {
        root: None,
        label_fields,
        max_reported_errors: max_errors,
        follow_symlinks,
    };
    let config = load_config(config_path, &overrides)?;

    let files = data::collect_files(
        &paths,
        Some(config.paths.output_extension.as_str()),
        config.validation.follow_symlinks,
    )?;
    if files.is_empty() {
        anyhow::bail!(
            "No .{} files found in the given paths",
            config.paths.output_extension
        );
    }
    info!("validating {} files", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        pb.set_message(file.display().to_string());
        let report = data::validate_file(file, &config.validation)
            .with_context(|| format!("Failed to validate {}", file.display()))?;
        reports.push(report);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let summary = ValidationSummary::from_reports(reports, &config.validation.label_fields);
    if json {
        print_json(&summary)?;
    } else {
        print!("{}", render_validation(&summary));
    }

    Ok(if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn count_lines(paths: Vec<PathBuf>, extension: String, json: bool) -> Result<ExitCode> {
    #[derive(Serialize)]
    struct LineCount {
        path: PathBuf,
        lines: usize,
    }

    let files = data::collect_files(&paths, Some(extension.as_str()), false)?;
    let counts = files
        .into_iter()
        .map(|path| -> Result<LineCount> {
            let lines = data::count_lines(&path)?;
            Ok(LineCount { path, lines })
        })
        .collect::<Result<Vec<_>>>()?;
    let total: usize = counts.iter().map(|c| c.lines).sum();

    if json {
        print_json(&serde_json::json!({
            "files": counts,
            "total": total,
        }))?;
    } else {
        for count in &counts {
            println!("{:>10}  {}", count.lines, count.path.display());
        }
        println!("{:>10}  total", total);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn show_config(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<ExitCode> {
    let overrides = Overrides {
        root,
        ..Default::default()
    };
    let config = load_config(config_path, &overrides)?;
    println!("{}", config.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
